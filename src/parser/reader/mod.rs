//! Primitive readers on top of a seekable byte source.
//!
//! Unlike the rest of the parser, these don't operate on an in-memory slice,
//! so that the packed payload never has to be loaded in full.

mod source;
pub use source::*;

use super::err::*;

use std::io::{self, Read, Seek, SeekFrom};

use bitvec::prelude::*;
use byteorder::{LittleEndian, ReadBytesExt};
use widestring::U16String;

/// Reads the primitive encodings of the format (little-endian integers, 7z's variable-length integers,
/// bit vectors and UTF-16 strings) from a source, optionally refusing to go past a soft limit.
#[derive(Debug)]
pub struct BitReader<R> {
    inner: R,
    limit: Option<u64>,
}

impl<R: Read + Seek> BitReader<R> {
    pub fn new(inner: R) -> Self {
        return BitReader { inner, limit: None };
    }

    pub fn into_inner(self) -> R {
        return self.inner;
    }

    pub fn position(&mut self) -> SevenZResult<u64> {
        return Ok(self.inner.stream_position()?);
    }

    /// The absolute position reads may not cross, if any.
    pub fn limit(&self) -> Option<u64> {
        return self.limit;
    }

    /// Forbid reading past `n`, either as an absolute position or relative to the current one.
    ///
    /// Replaces any limit that was set before.
    pub fn set_limit(&mut self, n: u64, absolute: bool) -> SevenZResult<()> {
        let limit = if absolute {
            n
        } else {
            let position = self.position()?;
            position
                .checked_add(n)
                .ok_or(SevenZError::BoundsViolation {
                    limit: u64::MAX,
                    position,
                })?
        };
        self.limit = Some(limit);
        return Ok(());
    }

    pub fn clear_limit(&mut self) {
        self.limit = None;
    }

    /// Bytes left before the limit, or before the end of the source if there is none.
    pub fn remaining(&mut self) -> SevenZResult<u64> {
        let position = self.position()?;
        let end = match self.limit {
            Some(limit) => limit,
            None => {
                let end = self.inner.seek(SeekFrom::End(0))?;
                self.inner.seek(SeekFrom::Start(position))?;
                end
            }
        };
        return Ok(end.saturating_sub(position));
    }

    fn check_limit(&mut self) -> SevenZResult<()> {
        if let Some(limit) = self.limit {
            let position = self.position()?;
            if position > limit {
                return Err(SevenZError::BoundsViolation { limit, position });
            }
        }
        return Ok(());
    }

    /// Run a primitive read, turning a short read into `UnexpectedEof` and checking the limit afterwards.
    fn read_with<T>(&mut self, f: impl FnOnce(&mut R) -> io::Result<T>) -> SevenZResult<T> {
        let value = match f(&mut self.inner) {
            Ok(value) => value,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                let position = self.position()?;
                return Err(SevenZError::UnexpectedEof { position });
            }
            Err(e) => return Err(e.into()),
        };
        self.check_limit()?;
        return Ok(value);
    }

    pub fn read_u8(&mut self) -> SevenZResult<u8> {
        return self.read_with(|r| r.read_u8());
    }

    pub fn read_u16(&mut self) -> SevenZResult<u16> {
        return self.read_with(|r| r.read_u16::<LittleEndian>());
    }

    pub fn read_u32(&mut self) -> SevenZResult<u32> {
        return self.read_with(|r| r.read_u32::<LittleEndian>());
    }

    pub fn read_u64(&mut self) -> SevenZResult<u64> {
        return self.read_with(|r| r.read_u64::<LittleEndian>());
    }

    /// Read exactly `len` bytes.
    ///
    /// The limit is checked up front, so a corrupt length can't cause a huge allocation
    /// when a limit is active.
    pub fn read_bytes(&mut self, len: u64) -> SevenZResult<Vec<u8>> {
        let position = self.position()?;
        let end = position.checked_add(len).ok_or(SevenZError::BoundsViolation {
            limit: u64::MAX,
            position,
        })?;
        if let Some(limit) = self.limit {
            if end > limit {
                return Err(SevenZError::BoundsViolation {
                    limit,
                    position: end,
                });
            }
        }
        let mut buf = Vec::new();
        let got = self.inner.by_ref().take(len).read_to_end(&mut buf)?;
        if (got as u64) < len {
            return Err(SevenZError::UnexpectedEof {
                position: position + got as u64,
            });
        }
        return Ok(buf);
    }

    /// 7zip uses a packed integer format to represent most u64 values.
    ///
    /// The number of leading one bits in the first byte is the number of little-endian bytes that follow,
    /// and the remaining low bits of the first byte are the most significant part of the value.
    pub fn read_varint(&mut self) -> SevenZResult<u64> {
        let first = self.read_u8()?;
        let mut mask: u8 = 0b1000_0000;
        let mut value: u64 = 0;
        for i in 0..8 {
            if first & mask == 0 {
                let high = u64::from(first & mask.wrapping_sub(1));
                return Ok(value | (high << (8 * i)));
            }
            value |= u64::from(self.read_u8()?) << (8 * i);
            mask >>= 1;
        }
        return Ok(value);
    }

    /// Like `read_varint`, but for counts that have to fit into memory.
    pub fn read_varint_usize(&mut self) -> SevenZResult<usize> {
        let value = self.read_varint()?;
        return usize::try_from(value).map_err(|_| SevenZError::BoundsViolation {
            limit: usize::MAX as u64,
            position: value,
        });
    }

    /// Read `count` flags packed most significant bit first; bit `i` of the result is flag `i`.
    pub fn read_bits(&mut self, count: usize) -> SevenZResult<BitVec> {
        let bytes = self.read_bytes(count.div_ceil(8) as u64)?;
        return Ok(bytes.view_bits::<Msb0>()[..count]
            .iter()
            .by_vals()
            .collect());
    }

    /// A leading non-zero byte means "all `count` flags set", otherwise the flags follow as in `read_bits`.
    pub fn read_all_or_bits(&mut self, count: usize) -> SevenZResult<BitVec> {
        let all_defined = self.read_u8()?;
        if all_defined != 0 {
            return Ok(BitVec::repeat(true, count));
        }
        return self.read_bits(count);
    }

    /// Read a zero-terminated UTF-16LE string.
    pub fn read_utf16le_cstring(&mut self) -> SevenZResult<String> {
        let mut units: Vec<u16> = Vec::new();
        loop {
            let unit = self.read_u16()?;
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        return U16String::from_vec(units)
            .to_string()
            .map_err(|_| SevenZError::InvalidName);
    }

    pub fn seek(&mut self, pos: SeekFrom) -> SevenZResult<u64> {
        let position = self.inner.seek(pos)?;
        self.check_limit()?;
        return Ok(position);
    }

    pub fn skip(&mut self, n: u64) -> SevenZResult<u64> {
        let delta = i64::try_from(n).map_err(|_| SevenZError::BoundsViolation {
            limit: i64::MAX as u64,
            position: n,
        })?;
        return self.seek(SeekFrom::Current(delta));
    }
}

impl<R: Read + Seek + Clone> BitReader<R> {
    /// A bounded view of the next `len` bytes, sharing this reader's source.
    ///
    /// The view must fit within the active limit. This reader's position is left untouched.
    pub fn sub_stream(&mut self, len: u64) -> SevenZResult<SubStream<R>> {
        let start = self.position()?;
        let end = start.checked_add(len).ok_or(SevenZError::BoundsViolation {
            limit: u64::MAX,
            position: start,
        })?;
        if let Some(limit) = self.limit {
            if end > limit {
                return Err(SevenZError::BoundsViolation {
                    limit,
                    position: end,
                });
            }
        }
        return Ok(SubStream::new(self.inner.clone(), start, len));
    }
}
