use super::*;
use crate::codec::CodecId;

use log::debug;

/// A parsed archive: where its single packed stream is, how to decode it, and the files inside.
///
/// Built once while opening, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Archive {
    /// Position right after the signature header. All stream positions are relative to it.
    pub payload_offset: u64,
    /// Position of the packed stream, relative to `payload_offset`.
    pub compressed_offset: u64,
    pub compressed_size: u64,
    /// `None` for archives without any file data.
    pub codec_id: Option<CodecId>,
    pub codec_properties: Vec<u8>,
    /// Size of the whole folder once decoded.
    pub decompressed_size: u64,
    /// Sizes of the substreams, in folder order.
    pub decompressed_sizes: Vec<u64>,
    pub folder_crc: Option<u32>,
    pub files: Vec<File>,
}

impl Archive {
    /// An archive without a header, so without files.
    pub fn empty(payload_offset: u64) -> Archive {
        return Archive {
            payload_offset,
            compressed_offset: 0,
            compressed_size: 0,
            codec_id: None,
            codec_properties: Vec::new(),
            decompressed_size: 0,
            decompressed_sizes: Vec::new(),
            folder_crc: None,
            files: Vec::new(),
        };
    }

    pub fn from_header(payload_offset: u64, header: Header) -> SevenZResult<Archive> {
        let mut archive = Archive::empty(payload_offset);
        if let Some(streams) = header.main_streams {
            archive.decompressed_sizes = streams.substream_sizes();
            archive.compressed_offset = streams.pack_info.pack_pos;
            archive.compressed_size = match streams.pack_info.size {
                Some(size) => size,
                None => return Err(SevenZError::unsupported("packed stream without a size")),
            };
            archive.decompressed_size = streams.unpack_info.unpack_size;
            archive.folder_crc = streams.unpack_info.crc;
            archive.codec_id = Some(streams.unpack_info.coder.id);
            archive.codec_properties = streams.unpack_info.coder.properties;
        }
        archive.files = header.files;
        debug!(
            "Archive: {} files, {} packed bytes at {} decoding to {}",
            archive.files.len(),
            archive.compressed_size,
            archive.compressed_offset,
            archive.decompressed_size
        );
        return Ok(archive);
    }

    /// Absolute position of the packed stream in the source.
    pub fn packed_stream_position(&self) -> SevenZResult<u64> {
        return self
            .payload_offset
            .checked_add(self.compressed_offset)
            .ok_or(SevenZError::BoundsViolation {
                limit: u64::MAX,
                position: self.compressed_offset,
            });
    }
}
