//! Sensor frame module
//!
//! This module provides the sensor-frame view types and the window extractor.

mod extractor;
pub mod types;

pub use extractor::{FrameExtractor, expand_to_full_range};
pub use types::{ExtractedImage, SensorFrame};
