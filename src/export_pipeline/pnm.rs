//! Portable Gray Map writing module
//!
//! Binary P5 output: ASCII header, then one big-endian 16-bit word per
//! sample, row-major, no padding.

use std::io::Write;

use tracing::debug;

use crate::export_pipeline::common::error::{ExportError, Result};
use crate::export_pipeline::frame::types::ExtractedImage;
use crate::export_pipeline::writer::GrayscaleWriter;

pub struct PnmWriter;

impl GrayscaleWriter for PnmWriter {
    fn write_image(&self, image: &ExtractedImage, output: &mut dyn Write) -> Result<()> {
        if image.is_empty() {
            return Err(ExportError::OutOfOrder);
        }

        debug!("Encoding PGM image: {}x{}", image.width, image.height);

        write!(output, "P5\n{} {}\n{}\n", image.width, image.height, u16::MAX)?;

        // Samples are encoded most significant byte first into an owned
        // buffer; the in-memory representation is never reinterpreted.
        let mut payload = Vec::with_capacity(image.samples.len() * 2);
        for &sample in &image.samples {
            payload.extend_from_slice(&sample.to_be_bytes());
        }
        output.write_all(&payload)?;

        debug!("PGM encoding complete");
        Ok(())
    }
}
