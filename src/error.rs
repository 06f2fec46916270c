//! The crate-wide error type.

use thiserror::Error;

/// Failures across the pixel container, the codec, and the image facade.
///
/// Every variant is terminal for the operation that produced it; no
/// partial output is valid and nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// A buffer was constructed from an empty or inconsistent shape.
    #[error("invalid image dimensions: {reason}")]
    InvalidDimensions { reason: &'static str },

    /// Pixel access outside the buffer extents.
    #[error("pixel ({row}, {col}) lies outside the {height}x{width} image")]
    OutOfBounds {
        row: u32,
        col: u32,
        height: u32,
        width: u32,
    },

    /// The image cannot be represented in the stream's length fields.
    #[error("a {height}x{width} image does not fit the stream format")]
    TooLarge { height: u32, width: u32 },

    /// No dictionary entry matched the current input position. Cannot
    /// happen when the start dictionary was built from the same input;
    /// surfaced instead of silently truncating the output.
    #[error("compression failed: no dictionary entry for symbol {symbol}")]
    CompressionFailure { symbol: u8 },

    /// The compressed stream is truncated or internally inconsistent.
    #[error("decompression failed: {reason}")]
    DecompressionFailure { reason: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "png")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
