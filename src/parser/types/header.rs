use super::*;
use crate::parser::interface::File;

pub const SIGNATURE_HEADER_SIZE_BYTES: usize = 6 + 2 + 4 + START_HEADER_SIZE_BYTES;
pub const START_HEADER_SIZE_BYTES: usize = 8 + 8 + 4;

#[derive(Debug, Clone, PartialEq)]
pub struct StartHeader {
    pub next_header_offset: u64,
    pub next_header_size: u64,
    pub next_header_crc: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveVersion {
    pub major: u8,
    pub minor: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureHeader {
    pub archive_version: ArchiveVersion,
    pub start_header_crc: u32,
    pub start_header: StartHeader,
}

/// A decoded (or never encoded) header.
///
/// File sizes and offsets are already resolved against the substreams of `main_streams`.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub main_streams: Option<StreamsInfo>,
    pub files: Vec<File>,
}
