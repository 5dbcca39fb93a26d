use super::LzmaParams;
use crate::parser::{SevenZError, SevenZResult};

use std::io::{self, Read, Seek, SeekFrom};

use log::trace;
use lzma_rust2::LzmaReader;

/// A decoded LZMA stream of known size.
///
/// LZMA can't be decoded starting anywhere but the beginning, so seeking only works forward
/// (by decoding and discarding). Seeking backwards fails with `io::ErrorKind::Unsupported`,
/// after which the caller is expected to open a fresh stream.
pub struct LzmaStream<R> {
    reader: LzmaReader<R>,
    position: u64,
    size: u64,
}

impl<R: Read> LzmaStream<R> {
    /// Start decoding `packed`, which yields `size` bytes once decoded.
    pub fn new(packed: R, params: &LzmaParams, size: u64) -> SevenZResult<Self> {
        trace!("Opening LZMA stream of {} bytes with {:?}", size, params);
        let reader = LzmaReader::new(
            packed,
            size,
            params.lc,
            params.lp,
            params.pb,
            params.dict_size,
            None,
        )
        .map_err(SevenZError::Decode)?;
        return Ok(LzmaStream {
            reader,
            position: 0,
            size,
        });
    }

    /// Current position in the decoded data.
    pub fn position(&self) -> u64 {
        return self.position;
    }

    /// Decoded size.
    pub fn len(&self) -> u64 {
        return self.size;
    }

    pub fn is_empty(&self) -> bool {
        return self.size == 0;
    }
}

impl<R: Read> Read for LzmaStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.position += n as u64;
        return Ok(n);
    }
}

impl<R: Read> Seek for LzmaStream<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(d) => self.size.checked_add_signed(d),
            SeekFrom::Current(d) => self.position.checked_add_signed(d),
        };
        let target = match target {
            Some(target) => target,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "seek to a negative position",
                ))
            }
        };
        if target < self.position {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "LZMA streams can't seek backwards",
            ));
        }

        let skip = target - self.position;
        let skipped = io::copy(&mut self.by_ref().take(skip), &mut io::sink())?;
        if skipped < skip {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "seek past the end of the decoded stream",
            ));
        }
        return Ok(self.position);
    }
}
