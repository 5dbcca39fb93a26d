#![forbid(unsafe_code)]
//! A crate for reading 7zip archives.
//!
//! Only the common simple layout is supported: one packed stream, compressed by a single LZMA coder,
//! holding the data of all files back to back. The header may be stored plain or LZMA-compressed itself.
//! Anything else (LZMA2, filters, encryption, solid blocks split into several folders) is reported as
//! unsupported instead of being read wrongly.
//!
//! ```no_run
//! let mut archive = sevenz_slim::open_path("archive.7z")?;
//! for file in archive.files().to_vec() {
//!     let contents = archive.get_content(&file)?;
//!     println!("{}: {} bytes", file.name, contents.len());
//! }
//! # Ok::<(), sevenz_slim::SevenZError>(())
//! ```

#![allow(clippy::needless_return)]

pub mod codec;
mod parser;
pub mod read;

pub use parser::{
    crc, parse, Archive, BitReader, File, FileTableBuilder, FileTime, PropertyID, SevenZError,
    SevenZErrorKind, SevenZResult, SharedSource, SubStream,
};
pub use read::{
    extract_file, open, open_bytes, open_path, open_with_config, ArchiveHandle, ReadConfig,
    SevenZArchive, StreamFactory,
};
