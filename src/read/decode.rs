//! This module implements handing the packed payload to the decoder.

use crate::codec::{LzmaParams, LzmaStream};
use crate::parser::{Archive, SevenZResult, SharedSource, SubStream};

use std::io::{BufReader, Read, Seek};

use log::debug;

/// Produces fresh decoded streams over an archive's payload.
///
/// Decoded streams may not be able to seek backwards, so `ArchiveHandle` asks for a new one when that's needed.
/// Any `FnMut() -> SevenZResult<S>` closure is a factory.
pub trait StreamFactory {
    type Stream: Read + Seek;

    fn open_stream(&mut self) -> SevenZResult<Self::Stream>;
}

impl<S, F> StreamFactory for F
where
    S: Read + Seek,
    F: FnMut() -> SevenZResult<S>,
{
    type Stream = S;

    fn open_stream(&mut self) -> SevenZResult<S> {
        return self();
    }
}

/// The decoded stream `PayloadFactory` produces.
pub type PayloadStream<R> = LzmaStream<BufReader<SubStream<SharedSource<R>>>>;

/// Opens LZMA decoders over the packed stream of an archive.
#[derive(Debug, Clone)]
pub struct PayloadFactory<R> {
    source: SharedSource<R>,
    position: u64,
    packed_size: u64,
    unpacked_size: u64,
    properties: Vec<u8>,
}

impl<R> PayloadFactory<R> {
    pub fn new(source: SharedSource<R>, archive: &Archive) -> SevenZResult<Self> {
        return Ok(PayloadFactory {
            source,
            position: archive.packed_stream_position()?,
            packed_size: archive.compressed_size,
            unpacked_size: archive.decompressed_size,
            properties: archive.codec_properties.clone(),
        });
    }
}

impl<R: Read + Seek> StreamFactory for PayloadFactory<R> {
    type Stream = PayloadStream<R>;

    fn open_stream(&mut self) -> SevenZResult<Self::Stream> {
        debug!(
            "Opening payload decoder: {} packed bytes at {}",
            self.packed_size, self.position
        );
        // Parsed on every open, so archives that only hold empty files never need valid properties
        let params = LzmaParams::from_properties(&self.properties)?;
        let packed = SubStream::new(self.source.clone(), self.position, self.packed_size);
        return LzmaStream::new(BufReader::new(packed), &params, self.unpacked_size);
    }
}
