use super::{ArchiveHandle, StreamFactory};
use crate::parser::{File, SevenZResult};

use core::iter::Iterator;

/// Iterates over each file in the archive, in archive order, along with its contents.
///
/// Files are extracted as they're reached, so the payload is decoded front to back just once.
pub struct Entries<'a, F: StreamFactory> {
    handle: &'a mut ArchiveHandle<F>,
    index: usize,
}

impl<'a, F: StreamFactory> Entries<'a, F> {
    /// Create a new iterator over the files of the given handle.
    pub fn new(handle: &'a mut ArchiveHandle<F>) -> Entries<'a, F> {
        return Entries { handle, index: 0 };
    }
}

impl<'a, F: StreamFactory> Iterator for Entries<'a, F> {
    type Item = SevenZResult<(File, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let file = self.handle.files().get(self.index)?.clone();
        self.index += 1;
        return Some(self.handle.get_content(&file).map(|data| (file, data)));
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.handle.files().len().saturating_sub(self.index);
        return (left, Some(left));
    }
}

impl<F: StreamFactory> ArchiveHandle<F> {
    /// Every file of the archive with its contents.
    pub fn entries(&mut self) -> Entries<'_, F> {
        return Entries::new(self);
    }
}
