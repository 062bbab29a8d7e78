//! Raw export pipeline module
//!
//! This module provides a structured approach to raw sensor export, with
//! separate modules for window extraction, tone-curve construction, container
//! writing, and session orchestration.

pub mod common;
pub mod config;
pub mod curve;
pub mod frame;
pub mod pnm;
pub mod session;
pub mod tiff;
mod writer;


pub use common::{
    ExportError,
    Result,
};

pub use config::{
    ExportParams,
    ExportParamsBuilder,
};

pub use curve::{
    CurveDirection,
    ToneCurve,
    ToneCurveBuilder,
};

pub use frame::{
    ExtractedImage,
    FrameExtractor,
    SensorFrame,
    expand_to_full_range,
};

pub use pnm::PnmWriter;

pub use session::{
    ExportSession,
    GammaPnmPipeline,
    ProcessedPipeline,
};

pub use tiff::{
    StripTiffWriter,
    TiffHeader,
    TiffTag,
};

pub use writer::GrayscaleWriter;
