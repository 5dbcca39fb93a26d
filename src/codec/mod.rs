//! Codec identification and the LZMA decoder glue.
//!
//! Only LZMA (`03 01 01`) is decoded, every other coder is recognized just well enough
//! to be named in an error message.

mod lzma;
pub use lzma::*;
#[cfg(test)]
mod test;

use crate::parser::{SevenZError, SevenZResult};

use core::fmt;

use nom::number::complete::{le_u32, u8};
use nom::sequence::pair;
use nom::IResult;

/// Coder IDs as listed in 7zip's methods.txt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecId {
    Copy,
    Delta,
    BcjX86,
    Bcj2,
    Lzma,
    Lzma2,
    Ppmd,
    Deflate,
    Deflate64,
    BZip2,
    Aes256Sha256,
    Unknown(Vec<u8>),
}

impl From<&[u8]> for CodecId {
    fn from(id: &[u8]) -> Self {
        use CodecId::*;
        match id {
            [0x00] => return Copy,
            [0x03] => return Delta,
            [0x21] => return Lzma2,
            [0x03, 0x01, 0x01] => return Lzma,
            [0x03, 0x03, 0x01, 0x03] => return BcjX86,
            [0x03, 0x03, 0x01, 0x1B] => return Bcj2,
            [0x03, 0x04, 0x01] => return Ppmd,
            [0x04, 0x01, 0x08] => return Deflate,
            [0x04, 0x01, 0x09] => return Deflate64,
            [0x04, 0x02, 0x02] => return BZip2,
            [0x06, 0xF1, 0x07, 0x01] => return Aes256Sha256,
            other => return Unknown(other.to_vec()),
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecId::Unknown(id) => return write!(f, "codec {:02x?}", id),
            known => return write!(f, "codec {:?}", known),
        }
    }
}

/// The minimum dictionary size LZMA encoders emit.
pub const LZMA_DICT_SIZE_MIN: u32 = 4096;
/// Exclusive upper bound (1.5 GiB) for the dictionary size.
pub const LZMA_DICT_SIZE_LIMIT: u32 = (1 << 30) + (1 << 29);

/// Decoder parameters carried by an LZMA coder's 5-byte property blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzmaParams {
    /// Number of literal context bits.
    pub lc: u32,
    /// Number of literal position bits.
    pub lp: u32,
    /// Number of position bits.
    pub pb: u32,
    pub dict_size: u32,
}

impl LzmaParams {
    /// Decode the property blob: one byte `(pb * 5 + lp) * 9 + lc`, then the dictionary size as a LE u32.
    pub fn from_properties(properties: &[u8]) -> SevenZResult<LzmaParams> {
        let parsed: IResult<&[u8], (u8, u32)> = pair(u8, le_u32)(properties);
        let (rest, (options, dict_size)) = match parsed {
            Ok(parsed) => parsed,
            Err(_) => {
                return Err(SevenZError::InvalidCodecProperties(format!(
                    "expected 5 property bytes, got {}",
                    properties.len()
                )))
            }
        };
        if !rest.is_empty() {
            return Err(SevenZError::InvalidCodecProperties(format!(
                "expected 5 property bytes, got {}",
                properties.len()
            )));
        }

        let options = u32::from(options);
        let pb = options / 45;
        let rem = options % 45;
        let lp = rem / 9;
        let lc = rem % 9;
        if pb > 4 {
            return Err(SevenZError::InvalidCodecProperties(format!(
                "pb = {} is larger than 4",
                pb
            )));
        }
        if lc + lp > 4 {
            return Err(SevenZError::InvalidCodecProperties(format!(
                "lc + lp = {} is larger than 4",
                lc + lp
            )));
        }
        if !(LZMA_DICT_SIZE_MIN..LZMA_DICT_SIZE_LIMIT).contains(&dict_size) {
            return Err(SevenZError::InvalidCodecProperties(format!(
                "dictionary size {} is out of range",
                dict_size
            )));
        }

        return Ok(LzmaParams {
            lc,
            lp,
            pb,
            dict_size,
        });
    }
}
