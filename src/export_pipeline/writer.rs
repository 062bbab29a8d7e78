use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::export_pipeline::common::error::{ExportError, Result};
use crate::export_pipeline::frame::types::ExtractedImage;

/// A serializer for 16-bit grayscale images.
pub trait GrayscaleWriter {
    fn write_image(&self, image: &ExtractedImage, output: &mut dyn Write) -> Result<()>;

    /// Writes to `path`. An unpopulated image is reported before the
    /// destination is created, so the failure never leaves a file behind.
    fn write_file(&self, path: &Path, image: &ExtractedImage) -> Result<()> {
        if image.is_empty() {
            return Err(ExportError::OutOfOrder);
        }
        let mut file = File::create(path).map_err(|e| ExportError::OpenFailure {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.write_image(image, &mut file)
    }
}
