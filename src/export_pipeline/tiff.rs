//! TIFF writing module
//!
//! Minimal baseline TIFF output: a fixed 13-entry directory followed by one
//! uncompressed strip of 16-bit grayscale samples.

mod header;
mod strip_writer;

pub use header::{HEADER_LEN, TiffHeader, TiffTag, tag};
pub use strip_writer::StripTiffWriter;
