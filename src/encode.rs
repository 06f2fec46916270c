//! The compression half of the codec.

use std::convert::TryFrom;

use log::debug;

use crate::error::Error;
use crate::raster::PixelBuffer;
use crate::stream;
use crate::{Code, MAX_ENTRIES};

/// Compress an image into the binary stream format.
///
/// The dictionary is seeded with the distinct pixel values of the image
/// in ascending order, and grows by one entry per emitted code (the
/// matched entry extended by the symbol that ended the match) until the
/// 16-bit code space is exhausted. The seed alphabet is recorded in the
/// stream header so [`decompress`](crate::decompress) can rebuild the
/// identical dictionary.
///
/// Output is deterministic for a given image. Fails with
/// [`Error::TooLarge`] when the extents or the code block exceed the
/// stream's length fields.
pub fn compress(image: &PixelBuffer) -> Result<Vec<u8>, Error> {
    let height = u16::try_from(image.height()).map_err(|_| Error::TooLarge {
        height: image.height(),
        width: image.width(),
    })?;
    let width = u16::try_from(image.width()).map_err(|_| Error::TooLarge {
        height: image.height(),
        width: image.width(),
    })?;

    let pixels = image.samples();
    let seeds = distinct_ascending(pixels);
    let mut tree = Tree::with_seeds(&seeds);
    let mut codes = Vec::new();

    let (&first, rest) = match pixels.split_first() {
        Some(split) => split,
        // A PixelBuffer always holds at least one pixel.
        None => {
            return Err(Error::InvalidDimensions {
                reason: "image has no pixels",
            })
        }
    };
    let mut current = tree
        .seed(first)
        .ok_or(Error::CompressionFailure { symbol: first })?;

    for &symbol in rest {
        match tree.step(current, symbol) {
            Some(next) => current = next,
            None => {
                codes.push(current);
                if tree.len() < MAX_ENTRIES {
                    tree.append(current, symbol);
                }
                current = tree
                    .seed(symbol)
                    .ok_or(Error::CompressionFailure { symbol })?;
            }
        }
    }
    codes.push(current);

    debug!(
        "compressed {} pixels into {} codes over a {}-symbol alphabet ({} dictionary entries)",
        pixels.len(),
        codes.len(),
        seeds.len(),
        tree.len()
    );

    stream::pack(height, width, &seeds, &codes)
}

/// Every value present in `pixels`, one entry each, ascending.
///
/// Ascending order is the canonical seed order of this format; it keeps
/// streams byte-identical across implementations.
fn distinct_ascending(pixels: &[u8]) -> Vec<u8> {
    let mut present = [false; 256];
    for &px in pixels {
        present[usize::from(px)] = true;
    }
    present
        .iter()
        .enumerate()
        .filter(|(_, &seen)| seen)
        .map(|(value, _)| value as u8)
        .collect()
}

const SHORT: usize = 16;

/// Prefix trie over the dictionary, one successor node per code.
///
/// Nodes with few successors stay in a compact linear-scan form and are
/// promoted to a direct 256-slot map once they outgrow it.
struct Tree {
    roots: [Option<Code>; 256],
    keys: Vec<NodeKey>,
    simples: Vec<Simple>,
    fulls: Vec<Full>,
}

#[derive(Clone, Copy)]
enum NodeKey {
    NoSuccessor,
    Simple(u32),
    Full(u32),
}

#[derive(Clone, Copy, Default)]
struct Simple {
    codes: [Code; SHORT],
    symbols: [u8; SHORT],
    count: u8,
}

struct Full {
    successors: [Option<Code>; 256],
}

impl Tree {
    fn with_seeds(seeds: &[u8]) -> Self {
        let mut roots = [None; 256];
        let mut keys = Vec::with_capacity(seeds.len() * 2);
        for (code, &symbol) in seeds.iter().enumerate() {
            roots[usize::from(symbol)] = Some(code as Code);
            keys.push(NodeKey::NoSuccessor);
        }
        Tree {
            roots,
            keys,
            simples: Vec::new(),
            fulls: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    /// Seed code of a single symbol, if the symbol is in the alphabet.
    fn seed(&self, symbol: u8) -> Option<Code> {
        self.roots[usize::from(symbol)]
    }

    /// Code of `entry(code) + symbol` when that entry already exists.
    fn step(&self, code: Code, symbol: u8) -> Option<Code> {
        match self.keys[usize::from(code)] {
            NodeKey::NoSuccessor => None,
            NodeKey::Simple(at) => {
                let node = &self.simples[at as usize];
                node.symbols[..usize::from(node.count)]
                    .iter()
                    .position(|&probe| probe == symbol)
                    .map(|slot| node.codes[slot])
            }
            NodeKey::Full(at) => self.fulls[at as usize].successors[usize::from(symbol)],
        }
    }

    /// Register `entry(code) + symbol` under the next free code. The
    /// caller guards the entry cap.
    fn append(&mut self, code: Code, symbol: u8) {
        let next = self.keys.len() as Code;
        match self.keys[usize::from(code)] {
            NodeKey::NoSuccessor => {
                let mut node = Simple::default();
                node.codes[0] = next;
                node.symbols[0] = symbol;
                node.count = 1;
                self.keys[usize::from(code)] = NodeKey::Simple(self.simples.len() as u32);
                self.simples.push(node);
            }
            NodeKey::Simple(at) if usize::from(self.simples[at as usize].count) < SHORT => {
                let node = &mut self.simples[at as usize];
                let slot = usize::from(node.count);
                node.codes[slot] = next;
                node.symbols[slot] = symbol;
                node.count += 1;
            }
            NodeKey::Simple(at) => {
                // Outgrown: promote the linear node to a direct map.
                let node = self.simples[at as usize];
                let mut full = Full {
                    successors: [None; 256],
                };
                for (&probe, &successor) in node.symbols.iter().zip(node.codes.iter()) {
                    full.successors[usize::from(probe)] = Some(successor);
                }
                full.successors[usize::from(symbol)] = Some(next);
                self.keys[usize::from(code)] = NodeKey::Full(self.fulls.len() as u32);
                self.fulls.push(full);
            }
            NodeKey::Full(at) => {
                self.fulls[at as usize].successors[usize::from(symbol)] = Some(next);
            }
        }
        self.keys.push(NodeKey::NoSuccessor);
    }
}
