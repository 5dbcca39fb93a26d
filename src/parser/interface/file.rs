use super::*;

use bitvec::prelude::*;
use log::trace;

const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x10;

/// A single entry of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: String,
    /// Size of the file's data once decoded.
    pub size: u64,
    /// Where the file's data starts in the decoded payload.
    /// Only meaningful when `has_stream` is set.
    pub offset: u64,
    /// Whether the file has data in the payload. Directories and empty files don't.
    pub has_stream: bool,
    /// Set for stream-less entries that are empty files rather than directories.
    pub is_empty_file: bool,
    /// CRC of the file's data, if the archive stores one.
    pub crc: Option<u32>,
    // Windows FILETIMEs, 100ns ticks since 1601-01-01
    pub ctime: Option<u64>,
    pub atime: Option<u64>,
    pub mtime: Option<u64>,
    /// Windows attributes; 7zip stores unix modes in the upper 16 bits.
    pub attributes: Option<u32>,
}

impl File {
    pub fn is_directory(&self) -> bool {
        if let Some(attributes) = self.attributes {
            if attributes & FILE_ATTRIBUTE_DIRECTORY != 0 {
                return true;
            }
        }
        return !self.has_stream && !self.is_empty_file;
    }
}

/// Which of the three time properties a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileTime {
    Created,
    Accessed,
    Modified,
}

/// Collects the per-file columns of `FilesInfo`, then turns them into `File`s.
///
/// Sizes and offsets are never set directly, they're derived from the substream sizes
/// in `assign_substreams`.
#[derive(Debug, Default)]
pub struct FileTableBuilder {
    names: Vec<Option<String>>,
    sizes: Vec<u64>,
    offsets: Vec<u64>,
    crcs: Vec<Option<u32>>,
    empty_streams: BitVec,
    empty_files: BitVec,
    ctimes: Vec<Option<u64>>,
    atimes: Vec<Option<u64>>,
    mtimes: Vec<Option<u64>>,
    attributes: Vec<Option<u32>>,
}

impl FileTableBuilder {
    pub fn new(num_files: usize) -> Self {
        let mut builder = FileTableBuilder::default();
        builder.reset(num_files);
        return builder;
    }

    /// Discard everything and start over with `num_files` files.
    pub fn reset(&mut self, num_files: usize) {
        self.names = vec![None; num_files];
        self.sizes = vec![0; num_files];
        self.offsets = vec![0; num_files];
        self.crcs = vec![None; num_files];
        self.empty_streams = BitVec::repeat(false, num_files);
        self.empty_files = BitVec::new();
        self.ctimes = vec![None; num_files];
        self.atimes = vec![None; num_files];
        self.mtimes = vec![None; num_files];
        self.attributes = vec![None; num_files];
    }

    pub fn len(&self) -> usize {
        return self.names.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.names.is_empty();
    }

    pub fn set_name(&mut self, index: usize, name: String) {
        if let Some(slot) = self.names.get_mut(index) {
            *slot = Some(name);
        }
    }

    /// Bit `i` set means file `i` has no data in the payload.
    pub fn set_empty_stream_mask(&mut self, mask: BitVec) {
        self.empty_streams = mask;
    }

    /// One bit per stream-less file, in file order. Set means "empty file", unset means "directory".
    pub fn set_empty_file_mask(&mut self, mask: BitVec) {
        self.empty_files = mask;
    }

    pub fn num_empty_streams(&self) -> usize {
        return self.empty_streams.count_ones();
    }

    pub fn has_stream(&self, index: usize) -> bool {
        return !self.empty_streams.get(index).map_or(false, |bit| *bit);
    }

    pub fn set_times(&mut self, which: FileTime, times: Vec<Option<u64>>) {
        match which {
            FileTime::Created => self.ctimes = times,
            FileTime::Accessed => self.atimes = times,
            FileTime::Modified => self.mtimes = times,
        }
    }

    pub fn set_attributes(&mut self, attributes: Vec<Option<u32>>) {
        self.attributes = attributes;
    }

    /// Hand the substreams out to the stream-bearing files, in order.
    ///
    /// Each such file gets the next size and digest, and an offset that is the sum of all sizes before it.
    pub fn assign_substreams(
        &mut self,
        sizes: &[u64],
        digests: &[Option<u32>],
    ) -> SevenZResult<()> {
        let files = (0..self.len()).filter(|&i| self.has_stream(i)).count();
        if files != sizes.len() {
            return Err(SevenZError::StreamCountMismatch {
                files,
                substreams: sizes.len(),
            });
        }

        let mut substream = 0;
        let mut offset: u64 = 0;
        for index in 0..self.len() {
            if !self.has_stream(index) {
                self.sizes[index] = 0;
                self.offsets[index] = 0;
                continue;
            }
            let size = sizes[substream];
            self.sizes[index] = size;
            self.offsets[index] = offset;
            self.crcs[index] = digests.get(substream).copied().flatten();
            trace!("File {}: {} bytes at offset {}", index, size, offset);
            offset = offset
                .checked_add(size)
                .ok_or(SevenZError::BoundsViolation {
                    limit: u64::MAX,
                    position: offset,
                })?;
            substream += 1;
        }
        return Ok(());
    }

    /// Produce the files in index order and reset to an empty table.
    pub fn build(&mut self) -> SevenZResult<Vec<File>> {
        let mut files = Vec::with_capacity(self.len());
        let mut empty_index = 0;
        for index in 0..self.len() {
            let has_stream = self.has_stream(index);
            let name = match self.names[index].take() {
                Some(name) => name,
                None if !has_stream => String::new(),
                None => return Err(SevenZError::MissingName { index }),
            };
            let mut is_empty_file = false;
            if !has_stream {
                is_empty_file = self.empty_files.get(empty_index).map_or(false, |bit| *bit);
                empty_index += 1;
            }
            files.push(File {
                name,
                size: self.sizes[index],
                offset: self.offsets[index],
                has_stream,
                is_empty_file,
                crc: self.crcs[index],
                ctime: self.ctimes.get(index).copied().flatten(),
                atime: self.atimes.get(index).copied().flatten(),
                mtime: self.mtimes.get(index).copied().flatten(),
                attributes: self.attributes.get(index).copied().flatten(),
            });
        }
        self.reset(0);
        return Ok(files);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn named(num_files: usize) -> FileTableBuilder {
        let mut table = FileTableBuilder::new(num_files);
        for i in 0..num_files {
            table.set_name(i, format!("file{}", i));
        }
        return table;
    }

    #[test]
    fn offsets_skip_empty_streams() {
        let mut table = named(5);
        table.set_empty_stream_mask(bitvec![0, 1, 0, 1, 0]);
        table.set_empty_file_mask(bitvec![1, 0]);
        table
            .assign_substreams(&[3, 5, 7], &[Some(1), None, Some(3)])
            .unwrap();
        let files = table.build().unwrap();

        let summary: Vec<(bool, u64, u64, Option<u32>)> = files
            .iter()
            .map(|f| (f.has_stream, f.size, f.offset, f.crc))
            .collect();
        assert_eq!(
            summary,
            vec![
                (true, 3, 0, Some(1)),
                (false, 0, 0, None),
                (true, 5, 3, None),
                (false, 0, 0, None),
                (true, 7, 8, Some(3)),
            ]
        );
        assert!(files[1].is_empty_file);
        assert!(!files[1].is_directory());
        assert!(!files[3].is_empty_file);
        assert!(files[3].is_directory());

        // Sizes consumed add up to the folder
        let total: u64 = files.iter().filter(|f| f.has_stream).map(|f| f.size).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn stream_count_must_match() {
        let mut table = named(3);
        table.set_empty_stream_mask(bitvec![0, 1, 0]);
        let err = table.assign_substreams(&[1, 2, 3], &[]).unwrap_err();
        assert!(matches!(
            err,
            SevenZError::StreamCountMismatch {
                files: 2,
                substreams: 3
            }
        ));
    }

    #[test]
    fn missing_names() {
        let mut table = FileTableBuilder::new(2);
        table.set_empty_stream_mask(bitvec![1, 0]);
        table.set_name(0, String::from("dir"));
        table.assign_substreams(&[4], &[None]).unwrap();
        let err = table.build().unwrap_err();
        assert!(matches!(err, SevenZError::MissingName { index: 1 }));

        // Unnamed stream-less entries are tolerated
        let mut table = FileTableBuilder::new(2);
        table.set_empty_stream_mask(bitvec![1, 0]);
        table.set_name(1, String::from("file"));
        table.assign_substreams(&[4], &[None]).unwrap();
        let files = table.build().unwrap();
        assert_eq!(files[0].name, "");
        assert_eq!(files[1].name, "file");
    }

    #[test]
    fn build_resets() {
        let mut table = named(1);
        table.assign_substreams(&[2], &[None]).unwrap();
        assert_eq!(table.build().unwrap().len(), 1);
        assert!(table.is_empty());
        assert_eq!(table.build().unwrap(), vec![]);
    }

    #[test]
    fn directory_attribute() {
        let mut table = named(1);
        table.set_attributes(vec![Some(FILE_ATTRIBUTE_DIRECTORY)]);
        table.set_times(FileTime::Modified, vec![Some(42)]);
        table.assign_substreams(&[0], &[None]).unwrap();
        let files = table.build().unwrap();
        assert!(files[0].is_directory());
        assert_eq!(files[0].mtime, Some(42));
        assert_eq!(files[0].ctime, None);
    }
}
