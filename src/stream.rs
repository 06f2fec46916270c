//! Framing for the compressed stream.
//!
//! Layout, every multi-byte integer big-endian:
//!
//! | offset | size | field                                    |
//! |--------|------|------------------------------------------|
//! | 0      | 2    | height                                   |
//! | 2      | 2    | width                                    |
//! | 4      | 2    | start-dictionary byte length `S`         |
//! | 6      | S    | start-dictionary symbols, in seed order  |
//! | 6+S    | 4    | code-block byte length `C`, multiple of 2|
//! | 10+S   | C    | `C / 2` codes of 16 bits each            |
//!
//! Unpacking is strict: truncation at any point, an odd `C`, an empty
//! code block, and bytes past the declared code block are all rejected.

use std::convert::TryFrom;

use crate::error::Error;
use crate::Code;

pub(crate) struct Frame {
    pub height: u16,
    pub width: u16,
    pub seeds: Vec<u8>,
    pub codes: Vec<Code>,
}

pub(crate) fn pack(
    height: u16,
    width: u16,
    seeds: &[u8],
    codes: &[Code],
) -> Result<Vec<u8>, Error> {
    // At most 256 distinct byte values exist, so `S` always fits.
    debug_assert!(seeds.len() <= 256);
    let code_bytes = codes
        .len()
        .checked_mul(2)
        .and_then(|len| u32::try_from(len).ok())
        .ok_or(Error::TooLarge {
            height: u32::from(height),
            width: u32::from(width),
        })?;

    let mut out = Vec::with_capacity(10 + seeds.len() + codes.len() * 2);
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&(seeds.len() as u16).to_be_bytes());
    out.extend_from_slice(seeds);
    out.extend_from_slice(&code_bytes.to_be_bytes());
    for &code in codes {
        out.extend_from_slice(&code.to_be_bytes());
    }
    Ok(out)
}

pub(crate) fn unpack(mut bytes: &[u8]) -> Result<Frame, Error> {
    let height = read_u16(&mut bytes, "stream ends inside the header")?;
    let width = read_u16(&mut bytes, "stream ends inside the header")?;
    let seed_len = read_u16(&mut bytes, "stream ends inside the header")?;
    let seeds = take(
        &mut bytes,
        usize::from(seed_len),
        "start dictionary is shorter than its declared length",
    )?
    .to_vec();
    let code_bytes = read_u32(&mut bytes, "stream ends before the code block length")?;
    if code_bytes == 0 {
        return Err(Error::DecompressionFailure {
            reason: "code block is empty",
        });
    }
    if code_bytes % 2 != 0 {
        return Err(Error::DecompressionFailure {
            reason: "code block length is not a multiple of two",
        });
    }
    let code_field = take(
        &mut bytes,
        code_bytes as usize,
        "code block is shorter than its declared length",
    )?;
    if !bytes.is_empty() {
        return Err(Error::DecompressionFailure {
            reason: "trailing bytes after the code block",
        });
    }
    let codes = code_field
        .chunks_exact(2)
        .map(|pair| Code::from_be_bytes([pair[0], pair[1]]))
        .collect();
    Ok(Frame {
        height,
        width,
        seeds,
        codes,
    })
}

fn take<'a>(bytes: &mut &'a [u8], len: usize, reason: &'static str) -> Result<&'a [u8], Error> {
    if bytes.len() < len {
        return Err(Error::DecompressionFailure { reason });
    }
    let (head, tail) = bytes.split_at(len);
    *bytes = tail;
    Ok(head)
}

fn read_u16(bytes: &mut &[u8], reason: &'static str) -> Result<u16, Error> {
    let field = take(bytes, 2, reason)?;
    Ok(u16::from_be_bytes([field[0], field[1]]))
}

fn read_u32(bytes: &mut &[u8], reason: &'static str) -> Result<u32, Error> {
    let field = take(bytes, 4, reason)?;
    Ok(u32::from_be_bytes([field[0], field[1], field[2], field[3]]))
}

#[cfg(test)]
mod tests {
    use super::{pack, unpack};
    use crate::error::Error;

    #[test]
    fn packs_the_documented_layout() {
        let bytes = pack(2, 3, &[5, 7], &[0, 1, 2]).unwrap();
        assert_eq!(
            bytes,
            vec![
                0, 2, // height
                0, 3, // width
                0, 2, // start-dictionary length
                5, 7, // seeds
                0, 0, 0, 6, // code-block byte length
                0, 0, 0, 1, 0, 2, // codes
            ]
        );
    }

    #[test]
    fn unpack_inverts_pack() {
        let bytes = pack(9, 4, &[0, 128, 255], &[2, 0, 1]).unwrap();
        let frame = unpack(&bytes).unwrap();
        assert_eq!(frame.height, 9);
        assert_eq!(frame.width, 4);
        assert_eq!(frame.seeds, vec![0, 128, 255]);
        assert_eq!(frame.codes, vec![2, 0, 1]);
    }

    #[test]
    fn truncation_rejected_at_every_point() {
        let bytes = pack(1, 2, &[5], &[0, 0]).unwrap();
        for cut in 0..bytes.len() {
            assert!(
                matches!(
                    unpack(&bytes[..cut]),
                    Err(Error::DecompressionFailure { .. })
                ),
                "prefix of {} bytes was not rejected",
                cut
            );
        }
        assert!(unpack(&bytes).is_ok());
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = pack(1, 2, &[5], &[0, 0]).unwrap();
        bytes.push(0);
        assert!(matches!(
            unpack(&bytes),
            Err(Error::DecompressionFailure { .. })
        ));
    }

    #[test]
    fn empty_code_block_rejected() {
        let bytes = pack(1, 1, &[5], &[]).unwrap();
        assert!(matches!(
            unpack(&bytes),
            Err(Error::DecompressionFailure { .. })
        ));
    }

    #[test]
    fn odd_code_block_length_rejected() {
        // Hand-built: declared C = 3 with three bytes present.
        let bytes = vec![0, 1, 0, 1, 0, 1, 5, 0, 0, 0, 3, 0, 0, 9];
        assert!(matches!(
            unpack(&bytes),
            Err(Error::DecompressionFailure { .. })
        ));
    }
}
