//! # LZW codec for grayscale raster images
//!
//! This crate stores a grayscale image as a dense pixel matrix
//! ([`PixelBuffer`]) and round-trips it losslessly through an LZW variant
//! with a fixed 16-bit code stream. The dictionary is seeded from the
//! distinct pixel values actually present in the image, and the seed
//! alphabet travels in the stream header so the decoder can rebuild an
//! identical dictionary. Both directions are pure in-memory
//! transformations; reading and writing standard raster files is the job
//! of the [`gray`] facade.
//!
//! ```
//! use graylzw::{compress, decompress, PixelBuffer};
//!
//! let mut image = PixelBuffer::new(2, 3).unwrap();
//! image.set(0, 0, 128).unwrap();
//! image.set(1, 2, 255).unwrap();
//!
//! let stream = compress(&image).unwrap();
//! assert_eq!(decompress(&stream).unwrap(), image);
//! ```
//!
//! The wire format is not compatible with GIF or TIFF LZW bitstreams;
//! codes are whole big-endian `u16` words and the framing is this crate's
//! own.

/// Hard cap on dictionary growth; every code must fit a 16-bit field.
pub(crate) const MAX_ENTRIES: usize = 1 << 16;

/// Alias for a LZW code point.
pub(crate) type Code = u16;

pub mod decode;
pub mod encode;
pub mod error;
pub mod gray;
pub mod raster;

mod stream;

pub use crate::decode::decompress;
pub use crate::encode::compress;
pub use crate::error::Error;
pub use crate::raster::PixelBuffer;
