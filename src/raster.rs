//! The pixel container the codec operates on.

use std::convert::TryFrom;
use std::fmt;

use crate::error::Error;

/// A dense grayscale image: `height` rows of `width` 8-bit pixels stored
/// row-major in one owned allocation.
///
/// The buffer is a plain value type. It is mutated in place through
/// bounds-checked [`set`], and the codec borrows the flat storage through
/// [`samples`] without copying.
///
/// [`set`]: #method.set
/// [`samples`]: #method.samples
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    height: u32,
    width: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer. Zero extents are rejected so that
    /// every constructible buffer holds at least one pixel.
    pub fn new(height: u32, width: u32) -> Result<Self, Error> {
        let len = checked_len(height, width)?;
        Ok(PixelBuffer {
            height,
            width,
            data: vec![0; len],
        })
    }

    /// Build a buffer from rows of pixel values.
    ///
    /// All rows must be non-empty and of equal length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, Error> {
        let width = match rows.first() {
            Some(row) => row.len(),
            None => {
                return Err(Error::InvalidDimensions {
                    reason: "matrix has no rows",
                })
            }
        };
        if rows.iter().any(|row| row.len() != width) {
            return Err(Error::InvalidDimensions {
                reason: "rows have unequal lengths",
            });
        }
        let height = u32::try_from(rows.len()).map_err(|_| Error::InvalidDimensions {
            reason: "row count exceeds the supported extents",
        })?;
        let width = u32::try_from(width).map_err(|_| Error::InvalidDimensions {
            reason: "row length exceeds the supported extents",
        })?;
        let len = checked_len(height, width)?;
        let mut data = Vec::with_capacity(len);
        for row in rows {
            data.extend_from_slice(row);
        }
        Ok(PixelBuffer {
            height,
            width,
            data,
        })
    }

    /// Build a buffer from an already flattened row-major sample vector.
    pub fn from_samples(height: u32, width: u32, samples: Vec<u8>) -> Result<Self, Error> {
        let len = checked_len(height, width)?;
        if samples.len() != len {
            return Err(Error::InvalidDimensions {
                reason: "sample count does not match the extents",
            });
        }
        Ok(PixelBuffer {
            height,
            width,
            data: samples,
        })
    }

    /// Adopt storage the codec produced itself; the length invariant is
    /// established by the caller.
    pub(crate) fn from_raw(height: u32, width: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), height as usize * width as usize);
        PixelBuffer {
            height,
            width,
            data,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Row-major view of every pixel, the order the codec consumes.
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Read the pixel at `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> Result<u8, Error> {
        self.index(row, col).map(|at| self.data[at])
    }

    /// Overwrite the pixel at `(row, col)`.
    pub fn set(&mut self, row: u32, col: u32, value: u8) -> Result<(), Error> {
        let at = self.index(row, col)?;
        self.data[at] = value;
        Ok(())
    }

    /// Overwrite every pixel with `value`.
    pub fn fill(&mut self, value: u8) {
        for px in self.data.iter_mut() {
            *px = value;
        }
    }

    /// Reset every pixel to zero.
    pub fn clear(&mut self) {
        self.fill(0);
    }

    fn index(&self, row: u32, col: u32) -> Result<usize, Error> {
        if row >= self.height || col >= self.width {
            return Err(Error::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(row as usize * self.width as usize + col as usize)
    }
}

fn checked_len(height: u32, width: u32) -> Result<usize, Error> {
    if height == 0 || width == 0 {
        return Err(Error::InvalidDimensions {
            reason: "extents must be non-zero",
        });
    }
    (height as usize)
        .checked_mul(width as usize)
        .ok_or(Error::InvalidDimensions {
            reason: "extents overflow the address space",
        })
}

/// One line per row, pixels as space-separated decimal values.
impl fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (at, row) in self.data.chunks(self.width as usize).enumerate() {
            if at > 0 {
                writeln!(f)?;
            }
            for (col, px) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", px)?;
            }
        }
        Ok(())
    }
}
