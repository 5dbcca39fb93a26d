//! This module contains a "high-level" interface to
//! the "low-level" types in `types`.
//!
//! This interface aims to make working with the archive easier than the raw data structures,
//! which are often idiosyncratic to save space in the archive.

mod archive;
mod file;
pub use archive::*;
pub use file::*;

use super::crc;
use super::err::*;
use super::parsers;
use super::reader::BitReader;
use super::types::*;
use crate::codec::{LzmaParams, LzmaStream};
use crate::read::ReadConfig;

use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};

use either::*;
use log::debug;

/// The entry point into the `parser` module.
/// Takes a source positioned anywhere, returns the parsed archive therein.
///
/// An encoded header is decoded and parsed again with the same grammar.
pub fn parse<R: Read + Seek + Clone>(
    source: &mut BitReader<R>,
    config: &ReadConfig,
) -> SevenZResult<Archive> {
    let signature = parsers::read_signature_header(source)?;
    let payload_offset = source.position()?;
    let start = &signature.start_header;
    debug!(
        "7z archive version {}.{}, next header: {} bytes at {}",
        signature.archive_version.major,
        signature.archive_version.minor,
        start.next_header_size,
        start.next_header_offset
    );

    if start.next_header_size == 0 {
        return Ok(Archive::empty(payload_offset));
    }
    if start.next_header_size > config.max_header_size {
        return Err(SevenZError::BoundsViolation {
            limit: config.max_header_size,
            position: start.next_header_size,
        });
    }

    let header_position = payload_offset
        .checked_add(start.next_header_offset)
        .ok_or(SevenZError::BoundsViolation {
            limit: u64::MAX,
            position: start.next_header_offset,
        })?;
    source.seek(SeekFrom::Start(header_position))?;
    let mut header_bytes = source.read_bytes(start.next_header_size)?;
    if config.verify_checksums {
        crc::verify("next header", start.next_header_crc, &header_bytes)?;
    }

    let mut decoded = false;
    loop {
        let mut next_header = BitReader::new(Cursor::new(header_bytes));
        match parsers::header_or_encoded(&mut next_header)? {
            Left(header) => return Archive::from_header(payload_offset, header),
            Right(_) if decoded => {
                return Err(SevenZError::unsupported("encoded header inside an encoded header"))
            }
            Right(streams) => {
                header_bytes = decode_header(source, payload_offset, &streams, config)?;
                decoded = true;
            }
        }
    }
}

/// Decode the packed header described by `streams`.
fn decode_header<R: Read + Seek + Clone>(
    source: &mut BitReader<R>,
    payload_offset: u64,
    streams: &StreamsInfo,
    config: &ReadConfig,
) -> SevenZResult<Vec<u8>> {
    let unpack = &streams.unpack_info;
    if streams.substream_sizes().len() != 1 {
        return Err(SevenZError::unsupported("encoded header split into substreams"));
    }
    if unpack.unpack_size > config.max_header_size {
        return Err(SevenZError::BoundsViolation {
            limit: config.max_header_size,
            position: unpack.unpack_size,
        });
    }
    let packed_size = match streams.pack_info.size {
        Some(size) => size,
        None => return Err(SevenZError::unsupported("packed stream without a size")),
    };
    let params = LzmaParams::from_properties(&unpack.coder.properties)?;

    let position = payload_offset
        .checked_add(streams.pack_info.pack_pos)
        .ok_or(SevenZError::BoundsViolation {
            limit: u64::MAX,
            position: streams.pack_info.pack_pos,
        })?;
    source.seek(SeekFrom::Start(position))?;
    let packed = source.sub_stream(packed_size)?;
    debug!(
        "Decoding {} byte header from {} packed bytes at {}",
        unpack.unpack_size, packed_size, position
    );

    let mut stream = LzmaStream::new(BufReader::new(packed), &params, unpack.unpack_size)?;
    let mut header = Vec::new();
    let got = stream
        .by_ref()
        .take(unpack.unpack_size)
        .read_to_end(&mut header)
        .map_err(SevenZError::Decode)?;
    if (got as u64) < unpack.unpack_size {
        return Err(SevenZError::Decode(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "packed header ended early",
        )));
    }

    if config.verify_checksums {
        if let Some(stored) = unpack.crc {
            crc::verify("encoded header", stored, &header)?;
        }
    }
    return Ok(header);
}
