//! Raw sensor window export library.
//!
//! Extracts a rectangular window from a raw photographic-sensor buffer and
//! serializes it as 16-bit grayscale PGM or baseline single-strip TIFF.

pub mod export_pipeline;
pub mod logger;
