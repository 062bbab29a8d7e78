use tracing::debug;

use crate::export_pipeline::common::error::{ExportError, Result};
use crate::export_pipeline::config::ExportParams;
use crate::export_pipeline::frame::types::{ExtractedImage, SensorFrame};

/// Crops the visible sensor window into an owned 16-bit buffer and, when the
/// configuration asks for it, expands sub-16-bit data to the full range.
pub struct FrameExtractor;

impl FrameExtractor {
    /// Extracts into a fresh buffer.
    pub fn extract(&self, frame: &SensorFrame<'_>, params: &ExportParams) -> Result<ExtractedImage> {
        let mut image = ExtractedImage::default();
        self.extract_into(frame, params, &mut image)?;
        Ok(image)
    }

    /// Extracts into `dest`, reusing its allocation where possible.
    ///
    /// The copy dimensions are the requested crop clamped to the
    /// margin-adjusted raw bounds, so an oversized request degrades to the
    /// available area and an out-of-range margin degrades to an empty image.
    pub fn extract_into(
        &self,
        frame: &SensorFrame<'_>,
        params: &ExportParams,
        dest: &mut ExtractedImage,
    ) -> Result<()> {
        let samples = frame.samples.ok_or(ExportError::OutOfOrder)?;

        let copy_width = frame
            .crop_width
            .min(frame.raw_width.saturating_sub(frame.left_margin));
        let copy_height = frame
            .crop_height
            .min(frame.raw_height.saturating_sub(frame.top_margin));
        let pitch = frame.row_pitch_bytes / 2;

        if copy_width > 0 && copy_height > 0 {
            let needed = (frame.top_margin + copy_height - 1) * pitch
                + frame.left_margin
                + copy_width;
            if samples.len() < needed {
                return Err(ExportError::TruncatedFrame {
                    expected: needed,
                    actual: samples.len(),
                });
            }
        }

        dest.resize(copy_width, copy_height)?;
        if copy_width > 0 {
            for row in 0..copy_height {
                let src = (row + frame.top_margin) * pitch + frame.left_margin;
                let dst = row * copy_width;
                dest.samples[dst..dst + copy_width]
                    .copy_from_slice(&samples[src..src + copy_width]);
            }
        }

        if wants_expansion(params) {
            expand_to_full_range(&mut dest.samples, params.input_bps);
        }

        debug!(
            width = copy_width,
            height = copy_height,
            depth = frame.sample_depth_bits,
            "Extracted sensor window"
        );
        Ok(())
    }
}

fn wants_expansion(params: &ExportParams) -> bool {
    !params.auto_scale
        && params.output_bps == 16
        && params.input_bps > 8
        && params.input_bps < params.output_bps
}

/// Expands linear sub-16-bit samples to the full 16-bit range.
///
/// A fixed linear remap against the nominal maximum of `depth`-bit data, not
/// a histogram stretch. Identity outside the (8, 16) depth range.
pub fn expand_to_full_range(samples: &mut [u16], depth: u32) {
    if depth <= 8 || depth >= 16 {
        return;
    }
    let nominal_max = (1u32 << depth) - 1;
    if nominal_max == 0 {
        return;
    }
    let nominal_max = f64::from(nominal_max);
    for sample in samples.iter_mut() {
        if *sample < u16::MAX {
            let scaled = (f64::from(*sample) / nominal_max * 65535.0).round();
            *sample = scaled.min(65535.0) as u16;
        }
    }
}
