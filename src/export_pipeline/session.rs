//! Session orchestration module
//!
//! One `ExportSession` drives a full export: window extraction into an owned
//! reusable buffer, then serialization through the container writers. The
//! processed-image path hands the actual pixel work to a `ProcessedPipeline`
//! collaborator.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tracing::{info, instrument};

use crate::export_pipeline::common::error::{ExportError, Result};
use crate::export_pipeline::config::ExportParams;
use crate::export_pipeline::curve::{ToneCurve, ToneCurveBuilder};
use crate::export_pipeline::frame::{ExtractedImage, FrameExtractor, SensorFrame};
use crate::export_pipeline::pnm::PnmWriter;
use crate::export_pipeline::tiff::StripTiffWriter;
use crate::export_pipeline::writer::GrayscaleWriter;

/// Bins per histogram band.
pub const HISTOGRAM_SIZE: usize = 0x2000;
/// Bands in the output histogram; grayscale data fills band 0.
pub const HISTOGRAM_BANDS: usize = 4;

/// Stage bits recorded on the session as work completes.
pub mod stage {
    /// The sensor window has been extracted.
    pub const EXTRACTED: u32 = 1 << 0;
    /// The processed image has been serialized.
    pub const SERIALIZED: u32 = 1 << 1;
}

/// The external collaborator that serializes a processed image.
///
/// Errors it raises pass through the session unchanged, wrapped in
/// [`ExportError::Pipeline`].
pub trait ProcessedPipeline {
    fn serialize(
        &self,
        image: &ExtractedImage,
        histogram: &mut [u32],
        output: &mut dyn Write,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Default processed-path collaborator: maps samples through a tone curve,
/// accumulates the luminance histogram, and serializes as binary PGM.
pub struct GammaPnmPipeline {
    curve: ToneCurve,
}

impl GammaPnmPipeline {
    pub fn new(gamma: f64) -> Self {
        Self {
            curve: ToneCurveBuilder::new(gamma).build(),
        }
    }
}

impl ProcessedPipeline for GammaPnmPipeline {
    fn serialize(
        &self,
        image: &ExtractedImage,
        histogram: &mut [u32],
        output: &mut dyn Write,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut mapped = image.clone();
        for sample in &mut mapped.samples {
            histogram[(*sample >> 3) as usize] += 1;
            *sample = self.curve.get(*sample);
        }
        PnmWriter.write_image(&mapped, output)?;
        Ok(())
    }
}

/// Orchestrates extraction and serialization for one export session.
///
/// Fully synchronous; the extraction buffer is the only state reused across
/// calls, so concurrent use is ruled out by `&mut self`.
pub struct ExportSession<P: ProcessedPipeline> {
    params: ExportParams,
    extractor: FrameExtractor,
    tiff_writer: StripTiffWriter,
    pipeline: P,
    unprocessed: Option<ExtractedImage>,
    processed: Option<ExtractedImage>,
    histogram: Option<Vec<u32>>,
    unprocessed_mode: bool,
    progress: u32,
}

impl ExportSession<GammaPnmPipeline> {
    pub fn new(params: ExportParams) -> Self {
        let pipeline = GammaPnmPipeline::new(params.gamma);
        Self::with_pipeline(params, pipeline)
    }
}

impl<P: ProcessedPipeline> ExportSession<P> {
    pub fn with_pipeline(params: ExportParams, pipeline: P) -> Self {
        let tiff_writer = StripTiffWriter {
            include_timestamp: params.include_timestamp,
        };
        Self {
            params,
            extractor: FrameExtractor,
            tiff_writer,
            pipeline,
            unprocessed: None,
            processed: None,
            histogram: None,
            unprocessed_mode: false,
            progress: 0,
        }
    }

    /// Crops the sensor window into the session's owned buffer, reusing the
    /// allocation from any previous extraction, and flips the session into
    /// unprocessed mode.
    #[instrument(skip(self, frame))]
    pub fn extract_unprocessed(&mut self, frame: &SensorFrame<'_>) -> Result<(usize, usize)> {
        let mut image = self.unprocessed.take().unwrap_or_default();
        let outcome = self.extractor.extract_into(frame, &self.params, &mut image);
        let dims = (image.width, image.height);
        self.unprocessed = Some(image);
        outcome?;

        self.unprocessed_mode = true;
        self.progress |= stage::EXTRACTED;
        info!(width = dims.0, height = dims.1, "Sensor window extracted");
        Ok(dims)
    }

    /// Serializes the extracted window as TIFF. Only valid in unprocessed
    /// mode with a populated buffer; there is no PGM path for unprocessed
    /// output.
    #[instrument(skip(self, path))]
    pub fn write_unprocessed<Q: AsRef<Path>>(&self, path: Q) -> Result<()> {
        if !self.unprocessed_mode {
            return Err(ExportError::OutOfOrder);
        }
        let image = self.unprocessed.as_ref().ok_or(ExportError::OutOfOrder)?;
        self.tiff_writer.write_file(path.as_ref(), image)?;
        info!(path = %path.as_ref().display(), "Unprocessed image written");
        Ok(())
    }

    /// Installs the processing collaborator's output image.
    pub fn set_processed(&mut self, image: ExtractedImage) {
        self.processed = Some(image);
    }

    /// Serializes the processed image through the pipeline collaborator.
    ///
    /// The path `"-"` streams to standard output; any other path is created
    /// on disk and closed on every exit. The histogram is allocated on first
    /// use.
    #[instrument(skip(self, path))]
    pub fn write_processed(&mut self, path: &str) -> Result<()> {
        let Some(image) = self.processed.as_ref() else {
            return Err(ExportError::OutOfOrder);
        };

        if self.histogram.is_none() {
            let mut bins = Vec::new();
            bins.try_reserve_exact(HISTOGRAM_BANDS * HISTOGRAM_SIZE)
                .map_err(|_| ExportError::AllocationFailure)?;
            bins.resize(HISTOGRAM_BANDS * HISTOGRAM_SIZE, 0);
            self.histogram = Some(bins);
        }
        let Some(histogram) = self.histogram.as_mut() else {
            return Err(ExportError::AllocationFailure);
        };

        if path == "-" {
            self.pipeline
                .serialize(image, histogram, &mut io::stdout().lock())
                .map_err(ExportError::Pipeline)?;
        } else {
            let mut file = File::create(path).map_err(|e| ExportError::OpenFailure {
                path: path.into(),
                source: e,
            })?;
            self.pipeline
                .serialize(image, histogram, &mut file)
                .map_err(ExportError::Pipeline)?;
        }

        self.progress |= stage::SERIALIZED;
        info!(path, "Processed image written");
        Ok(())
    }

    pub fn stage_complete(&self, bit: u32) -> bool {
        self.progress & bit != 0
    }

    pub fn unprocessed(&self) -> Option<&ExtractedImage> {
        self.unprocessed.as_ref()
    }

    pub fn histogram(&self) -> Option<&[u32]> {
        self.histogram.as_deref()
    }

    pub fn params(&self) -> &ExportParams {
        &self.params
    }

    pub fn set_params(&mut self, params: ExportParams) {
        self.params = params;
    }
}
