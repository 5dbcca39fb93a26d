//! Parsers for the 7z format.
//!
//! The fixed-size signature header is parsed from an in-memory slice with nom.
//! Everything after it is a sequence of tagged, variable-length sections and is read through a `BitReader`.

mod coders_info;
pub use coders_info::*;
mod files_info;
pub use files_info::*;
mod streams_info;
pub use streams_info::*;
mod header;
pub use header::*;

use super::crc;
use super::err::*;
use super::reader::BitReader;
use super::types::*;

use std::io::{Read, Seek, SeekFrom};

use nom::bytes::complete::take;
use nom::number::complete::{le_u32, le_u64, u8};
use nom::sequence::tuple;

/// Header magic bytes
pub const MAGIC: [u8; 6] = [b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C];

type NomResult<'a, T> = nom::IResult<&'a [u8], T>;

pub fn archive_version(input: &[u8]) -> NomResult<ArchiveVersion> {
    let (input, major) = u8(input)?;
    let (input, minor) = u8(input)?;
    return Ok((input, ArchiveVersion { major, minor }));
}

pub fn start_header(input: &[u8]) -> NomResult<StartHeader> {
    let (input, next_header_offset) = le_u64(input)?;
    let (input, next_header_size) = le_u64(input)?;
    let (input, next_header_crc) = le_u32(input)?;
    return Ok((
        input,
        StartHeader {
            next_header_offset,
            next_header_size,
            next_header_crc,
        },
    ));
}

/// Parse the 32 bytes at the very start of an archive.
///
/// The start header CRC is always checked, no matter the configuration:
/// without it, nothing else in the archive can be located.
pub fn signature_header(input: &[u8]) -> SevenZResult<SignatureHeader> {
    let truncated = |_| SevenZError::UnexpectedEof {
        position: input.len() as u64,
    };
    let (_, (magic, archive_version, start_header_crc, raw_start_header)) =
        tuple((
            take(MAGIC.len()),
            archive_version,
            le_u32,
            take(START_HEADER_SIZE_BYTES),
        ))(input)
        .map_err(truncated)?;

    if magic != MAGIC {
        let mut observed = [0u8; 6];
        observed.copy_from_slice(magic);
        return Err(SevenZError::BadSignature(observed));
    }

    crc::verify("start header", start_header_crc, raw_start_header)?;
    let (_, start_header) = start_header(raw_start_header).map_err(truncated)?;

    return Ok(SignatureHeader {
        archive_version,
        start_header_crc,
        start_header,
    });
}

/// Read and parse the signature header from the start of a source.
pub fn read_signature_header<R: Read + Seek>(
    input: &mut BitReader<R>,
) -> SevenZResult<SignatureHeader> {
    input.seek(SeekFrom::Start(0))?;
    let raw = input.read_bytes(SIGNATURE_HEADER_SIZE_BYTES as u64)?;
    return signature_header(&raw);
}

/// Read a property ID and fail unless it's `expected`.
pub fn expect_property<R: Read + Seek>(
    input: &mut BitReader<R>,
    expected: PropertyID,
) -> SevenZResult<()> {
    let observed = input.read_u8()?;
    return check_property(observed, expected);
}

pub fn check_property(observed: u8, expected: PropertyID) -> SevenZResult<()> {
    if observed != expected as u8 {
        return Err(SevenZError::TagMismatch { expected, observed });
    }
    return Ok(());
}
