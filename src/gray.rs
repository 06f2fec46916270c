//! The image facade: standard raster files on one side, compressed
//! streams on the other.
//!
//! The codec core is bytes-in/bytes-out and knows nothing about file
//! formats. This module supplies the two collaborators around it: a
//! capability interface for decoding/encoding standard raster images
//! ([`RasterFormat`], with a PNG-backed implementation behind the `png`
//! feature) and the file-level compress/decompress operations.

use std::fs;
use std::path::Path;

use log::debug;

use crate::decode::decompress;
use crate::encode::compress;
use crate::error::Error;
use crate::raster::PixelBuffer;

/// Capability interface for standard raster image formats.
///
/// Anything that can produce and consume a row-major 8-bit luminance
/// matrix plugs in here; the codec never touches a format library.
pub trait RasterFormat {
    /// Decode an image file into `(height, width, samples)` with the
    /// samples in row-major order.
    fn decode(&self, bytes: &[u8]) -> Result<(u32, u32, Vec<u8>), Error>;

    /// Encode a row-major luminance matrix into an image file.
    fn encode(&self, height: u32, width: u32, samples: &[u8]) -> Result<Vec<u8>, Error>;
}

/// PNG, plus the sibling formats the `image` crate recognizes by magic
/// bytes. Color inputs collapse to 8-bit luminance on decode.
#[cfg(feature = "png")]
pub struct Png;

#[cfg(feature = "png")]
impl RasterFormat for Png {
    fn decode(&self, bytes: &[u8]) -> Result<(u32, u32, Vec<u8>), Error> {
        let gray = image::load_from_memory(bytes)?.into_luma8();
        let (width, height) = gray.dimensions();
        Ok((height, width, gray.into_raw()))
    }

    fn encode(&self, height: u32, width: u32, samples: &[u8]) -> Result<Vec<u8>, Error> {
        let gray: image::GrayImage = image::ImageBuffer::from_raw(width, height, samples.to_vec())
            .ok_or(Error::InvalidDimensions {
                reason: "sample count does not match the extents",
            })?;
        let mut bytes = Vec::new();
        gray.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Read a raster image file into a pixel buffer.
pub fn read_image<F, P>(format: &F, path: P) -> Result<PixelBuffer, Error>
where
    F: RasterFormat,
    P: AsRef<Path>,
{
    let bytes = fs::read(path)?;
    let (height, width, samples) = format.decode(&bytes)?;
    PixelBuffer::from_samples(height, width, samples)
}

/// Write a pixel buffer out as a raster image file.
pub fn write_image<F, P>(format: &F, image: &PixelBuffer, path: P) -> Result<(), Error>
where
    F: RasterFormat,
    P: AsRef<Path>,
{
    let bytes = format.encode(image.height(), image.width(), image.samples())?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Compress an image and write the stream to `path`.
pub fn compress_to_file<P: AsRef<Path>>(image: &PixelBuffer, path: P) -> Result<(), Error> {
    let stream = compress(image)?;
    debug!(
        "compressed {} pixels into {} stream bytes",
        image.samples().len(),
        stream.len()
    );
    fs::write(path, stream)?;
    Ok(())
}

/// Read a compressed stream from `path` and reconstruct the image.
pub fn decompress_from_file<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, Error> {
    let stream = fs::read(path)?;
    decompress(&stream)
}
