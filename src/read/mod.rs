//! This module implements an interface for reading 7zip archives.

mod config;
mod decode;
mod iter;
mod simplistic;
#[cfg(test)]
mod test;

use crate::parser::{self, crc, Archive, BitReader, File, SevenZError, SevenZResult, SharedSource};

pub use config::*;
pub use decode::*;
pub use iter::*;
pub use simplistic::*;

use std::fs;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use log::debug;

/// An archive opened the usual way, over any seekable source.
pub type SevenZArchive<R> = ArchiveHandle<PayloadFactory<R>>;

/// A parsed archive together with the means to decode its payload.
///
/// The decoded stream is created on first use and kept around, so reading files in archive order
/// decodes the payload only once. Reading out of order may require starting over.
/// A handle is not meant to be shared between threads; open the source again instead.
pub struct ArchiveHandle<F: StreamFactory> {
    archive: Archive,
    factory: F,
    stream: Option<F::Stream>,
    verify_checksums: bool,
}

impl<F: StreamFactory> ArchiveHandle<F> {
    pub fn from_parts(archive: Archive, factory: F, config: &ReadConfig) -> Self {
        return ArchiveHandle {
            archive,
            factory,
            stream: None,
            verify_checksums: config.verify_checksums,
        };
    }

    pub fn archive(&self) -> &Archive {
        return &self.archive;
    }

    pub fn files(&self) -> &[File] {
        return &self.archive.files;
    }

    pub fn is_empty(&self) -> bool {
        return self.archive.files.is_empty();
    }

    /// The first file called `name`.
    pub fn find(&self, name: &str) -> Option<&File> {
        return self.archive.files.iter().find(|f| f.name == name);
    }

    pub fn into_archive(self) -> Archive {
        return self.archive;
    }

    /// Extract the file's contents into a vector.
    ///
    /// # Warning
    ///
    /// The entire file is loaded into RAM, check `File::size` first if that's a concern.
    pub fn get_content(&mut self, file: &File) -> SevenZResult<Vec<u8>> {
        if !file.has_stream || file.size == 0 {
            return Ok(Vec::new());
        }

        let data = match self.read_range(file.offset, file.size) {
            Err(SevenZError::SeekUnsupported { offset }) => {
                debug!("Decoded stream can't reach offset {}, starting over", offset);
                // The failed stream is gone, so this opens a fresh one
                self.read_range(file.offset, file.size)?
            }
            res => res?,
        };

        if self.verify_checksums {
            if let Some(stored) = file.crc {
                crc::verify("file", stored, &data)?;
            }
        }
        return Ok(data);
    }

    /// Like `get_content`, but by index into `files()`.
    pub fn get_content_at(&mut self, index: usize) -> SevenZResult<Vec<u8>> {
        let file = match self.archive.files.get(index) {
            Some(file) => file.clone(),
            None => return Err(SevenZError::NoSuchFileName(format!("#{}", index))),
        };
        return self.get_content(&file);
    }

    /// Read `size` bytes at `offset` of the decoded payload.
    ///
    /// The stream is only kept if this succeeds.
    fn read_range(&mut self, offset: u64, size: u64) -> SevenZResult<Vec<u8>> {
        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => self.factory.open_stream()?,
        };

        match stream.seek(SeekFrom::Start(offset)) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Unsupported => {
                return Err(SevenZError::SeekUnsupported { offset })
            }
            Err(e) => return Err(SevenZError::Decode(e)),
        }

        let mut data = Vec::new();
        stream
            .by_ref()
            .take(size)
            .read_to_end(&mut data)
            .map_err(SevenZError::Decode)?;
        if (data.len() as u64) < size {
            return Err(SevenZError::Decode(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "decoded payload ended early",
            )));
        }

        self.stream = Some(stream);
        return Ok(data);
    }
}

/// Open an archive from any seekable source.
pub fn open<R: Read + Seek>(reader: R) -> SevenZResult<SevenZArchive<R>> {
    return open_with_config(reader, &ReadConfig::default());
}

pub fn open_with_config<R: Read + Seek>(
    reader: R,
    config: &ReadConfig,
) -> SevenZResult<SevenZArchive<R>> {
    let source = SharedSource::new(reader);
    let mut header_reader = BitReader::new(source.clone());
    let archive = parser::parse(&mut header_reader, config)?;
    let factory = PayloadFactory::new(source, &archive)?;
    return Ok(ArchiveHandle::from_parts(archive, factory, config));
}

/// Open an archive held in memory.
pub fn open_bytes<B: AsRef<[u8]>>(data: B) -> SevenZResult<SevenZArchive<Cursor<B>>> {
    return open(Cursor::new(data));
}

pub fn open_path<P: AsRef<Path>>(path: P) -> SevenZResult<SevenZArchive<BufReader<fs::File>>> {
    let file = fs::File::open(path)?;
    return open(BufReader::new(file));
}
