//! Sensor frame data types

use crate::export_pipeline::common::error::{ExportError, Result};

/// A borrowed view of one raw sensor readout.
///
/// The sample buffer is owned by the calling session and outlives any single
/// extraction call. `samples` is `None` until the collaborator has loaded the
/// sensor data.
#[derive(Debug, Clone, Copy)]
pub struct SensorFrame<'a> {
    /// Full sensor width in samples, margins included
    pub raw_width: usize,
    /// Full sensor height in rows, margins included
    pub raw_height: usize,
    /// Masked rows above the visible area
    pub top_margin: usize,
    /// Masked columns left of the visible area
    pub left_margin: usize,
    /// Requested visible width
    pub crop_width: usize,
    /// Requested visible height
    pub crop_height: usize,
    /// Length of one sensor row in bytes; may exceed `raw_width * 2`
    pub row_pitch_bytes: usize,
    /// Bit depth of the sensor samples
    pub sample_depth_bits: u32,
    /// The sensor samples, if loaded
    pub samples: Option<&'a [u16]>,
}

/// An owned, row-major 16-bit grayscale image.
///
/// `samples.len() == width * height` holds whenever the image is populated.
#[derive(Debug, Clone, Default)]
pub struct ExtractedImage {
    pub width: usize,
    pub height: usize,
    pub samples: Vec<u16>,
}

impl ExtractedImage {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Resizes to `width * height` zeroed samples.
    ///
    /// Capacity is reserved fallibly before the buffer is touched, so the
    /// previous contents stay readable if the allocation fails.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        let len = width
            .checked_mul(height)
            .ok_or(ExportError::AllocationFailure)?;
        let additional = len.saturating_sub(self.samples.len());
        self.samples
            .try_reserve_exact(additional)
            .map_err(|_| ExportError::AllocationFailure)?;
        self.samples.clear();
        self.samples.resize(len, 0);
        self.width = width;
        self.height = height;
        Ok(())
    }
}
