//! The decompression half of the codec.

use log::debug;

use crate::error::Error;
use crate::raster::PixelBuffer;
use crate::stream;
use crate::{Code, MAX_ENTRIES};

/// Reconstruct an image from the binary stream format.
///
/// The dictionary is reseeded from the start-dictionary bytes in exactly
/// the order the stream carries them, then regrown code by code the same
/// way [`compress`](crate::compress) grew it, so both sides assign
/// identical codes without the entries ever being transmitted.
///
/// Fails with [`Error::DecompressionFailure`] when the stream is
/// truncated, declares lengths that disagree with the bytes present,
/// names a code the dictionary never defined, or does not decode to
/// exactly `height * width` pixels.
pub fn decompress(bytes: &[u8]) -> Result<PixelBuffer, Error> {
    let frame = stream::unpack(bytes)?;
    if frame.height == 0 || frame.width == 0 {
        return Err(Error::DecompressionFailure {
            reason: "image extents are zero",
        });
    }
    let expected = usize::from(frame.height) * usize::from(frame.width);

    let mut table = Table::with_seeds(&frame.seeds);
    let mut out = vec![0u8; expected];
    let mut written = 0usize;

    let mut codes = frame.codes.iter().copied();
    let first = match codes.next() {
        Some(code) => code,
        // Unreachable: unpack rejects an empty code block.
        None => {
            return Err(Error::DecompressionFailure {
                reason: "code block is empty",
            })
        }
    };
    if usize::from(first) >= table.len() {
        return Err(Error::DecompressionFailure {
            reason: "code refers to an entry the dictionary never defined",
        });
    }
    written += table.emit(first, &mut out, written)?;
    let mut previous = first;

    for code in codes {
        let size = table.len();
        let entry = if usize::from(code) < size {
            if size < MAX_ENTRIES {
                table.derive(previous, table.first(code));
            }
            code
        } else if usize::from(code) == size && size < MAX_ENTRIES {
            // The encoder referred to the entry it had only just created
            // from the previous match: the previous entry extended by its
            // own first symbol. Materialize it, then emit it.
            table.derive(previous, table.first(previous))
        } else {
            return Err(Error::DecompressionFailure {
                reason: "code refers to an entry the dictionary never defined",
            });
        };
        written += table.emit(entry, &mut out, written)?;
        previous = entry;
    }

    if written != expected {
        return Err(Error::DecompressionFailure {
            reason: "code stream does not decode to height*width pixels",
        });
    }

    debug!(
        "rebuilt {} dictionary entries while decoding {} pixels",
        table.len(),
        written
    );
    Ok(PixelBuffer::from_raw(
        u32::from(frame.height),
        u32::from(frame.width),
        out,
    ))
}

/// One dictionary entry: the entry it extends plus one symbol. `first`
/// caches the entry's first symbol so growing the table and resolving
/// the not-yet-defined case never walk the chain.
#[derive(Clone, Copy)]
struct Link {
    prev: Code,
    symbol: u8,
    first: u8,
}

/// The decoder's dictionary. Entries are never materialized as byte
/// strings; emitting one walks its links backward into the output slice.
struct Table {
    links: Vec<Link>,
    depths: Vec<u32>,
}

impl Table {
    fn with_seeds(seeds: &[u8]) -> Self {
        let mut table = Table {
            links: Vec::with_capacity(MAX_ENTRIES),
            depths: Vec::with_capacity(MAX_ENTRIES),
        };
        for &symbol in seeds {
            // `prev` of a seed is never followed; depth ends the walk.
            table.links.push(Link {
                prev: 0,
                symbol,
                first: symbol,
            });
            table.depths.push(1);
        }
        table
    }

    fn len(&self) -> usize {
        self.links.len()
    }

    fn first(&self, code: Code) -> u8 {
        self.links[usize::from(code)].first
    }

    /// Append `entry(prev) + symbol` under the next free code and return
    /// that code. The caller guards the entry cap.
    fn derive(&mut self, prev: Code, symbol: u8) -> Code {
        let code = self.links.len() as Code;
        let first = self.first(prev);
        self.links.push(Link {
            prev,
            symbol,
            first,
        });
        self.depths.push(self.depths[usize::from(prev)] + 1);
        code
    }

    /// Write the symbols of `code` into `out` starting at `at`; returns
    /// how many symbols were written.
    fn emit(&self, code: Code, out: &mut [u8], at: usize) -> Result<usize, Error> {
        let depth = self.depths[usize::from(code)] as usize;
        if depth > out.len() - at {
            return Err(Error::DecompressionFailure {
                reason: "code stream decodes to more pixels than the image holds",
            });
        }
        let mut walk = usize::from(code);
        for slot in out[at..at + depth].iter_mut().rev() {
            let link = &self.links[walk];
            *slot = link.symbol;
            walk = usize::from(link.prev);
        }
        Ok(depth)
    }
}
