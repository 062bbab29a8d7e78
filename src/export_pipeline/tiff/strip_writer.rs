use std::io::Write;

use chrono::Local;
use tracing::debug;

use crate::export_pipeline::common::error::{ExportError, Result};
use crate::export_pipeline::frame::types::ExtractedImage;
use crate::export_pipeline::tiff::header::TiffHeader;
use crate::export_pipeline::writer::GrayscaleWriter;

/// Writes a single uncompressed strip behind the fixed directory header.
#[derive(Debug, Clone)]
pub struct StripTiffWriter {
    /// Whether the DateTime tag carries the current local time; the field
    /// stays zeroed otherwise.
    pub include_timestamp: bool,
}

impl Default for StripTiffWriter {
    fn default() -> Self {
        Self {
            include_timestamp: true,
        }
    }
}

impl GrayscaleWriter for StripTiffWriter {
    fn write_image(&self, image: &ExtractedImage, output: &mut dyn Write) -> Result<()> {
        if image.is_empty() {
            return Err(ExportError::OutOfOrder);
        }

        debug!("Encoding TIFF image: {}x{}", image.width, image.height);

        let timestamp = self.include_timestamp.then(Local::now);
        let header = TiffHeader::new(image.width as u32, image.height as u32, timestamp);
        output.write_all(&header.encode())?;

        // The strip payload stays in little-endian order; the declared
        // big-endian byte order applies to the directory only. Consumers of
        // these files byte-swap the samples on load.
        let mut payload = Vec::with_capacity(image.samples.len() * 2);
        for &sample in &image.samples {
            payload.extend_from_slice(&sample.to_le_bytes());
        }
        output.write_all(&payload)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
