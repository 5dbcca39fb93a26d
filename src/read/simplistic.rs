//! This module provides a "simplistic" API for reading archives.
//!
//! It trades off precise control for ease of use.

use super::open_bytes;
use crate::parser::{SevenZError, SevenZResult};

/// Extract the file with the given `name` into a data buffer.
///
/// This involves parsing the entire archive for each file extracted, so it's not very efficient.
pub fn extract_file(name: &str, archive_data: &[u8]) -> SevenZResult<Vec<u8>> {
    let mut archive = open_bytes(archive_data)?;
    let file = match archive.find(name) {
        Some(f) => f.clone(),
        None => return Err(SevenZError::NoSuchFileName(String::from(name))),
    };
    return archive.get_content(&file);
}
