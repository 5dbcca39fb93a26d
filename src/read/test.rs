use super::*;
use crate::parser::SevenZErrorKind;

use std::cell::Cell;
use std::rc::Rc;

const PAYLOAD: &[u8] = b"test_a\ntest_b\n";

/// A decoded stream that can't seek backwards, like the real one, and can be told to
/// refuse a number of seeks outright.
struct StubStream {
    data: Cursor<Vec<u8>>,
    refuse_seeks: Rc<Cell<u32>>,
}

impl Read for StubStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        return self.data.read(buf);
    }
}

impl Seek for StubStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let refuse = self.refuse_seeks.get();
        if refuse > 0 {
            self.refuse_seeks.set(refuse - 1);
            return Err(io::Error::new(io::ErrorKind::Unsupported, "stub refuses"));
        }
        let before = self.data.position();
        let after = self.data.seek(pos)?;
        if after < before {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "backwards"));
        }
        return Ok(after);
    }
}

fn file(name: &str, offset: u64, size: u64, crc: Option<u32>) -> File {
    return File {
        name: String::from(name),
        size,
        offset,
        has_stream: true,
        is_empty_file: false,
        crc,
        ctime: None,
        atime: None,
        mtime: None,
        attributes: None,
    };
}

fn stub_archive() -> Archive {
    let mut archive = Archive::empty(32);
    archive.decompressed_size = PAYLOAD.len() as u64;
    archive.decompressed_sizes = vec![7, 7];
    archive.files = vec![
        file("test_a", 0, 7, Some(0x7c8ec20e)),
        file("test_b", 7, 7, Some(0x57a391cd)),
        File {
            has_stream: false,
            size: 0,
            ..file("dir", 0, 0, None)
        },
    ];
    return archive;
}

/// A handle over `PAYLOAD` whose streams refuse the first `refuse` seeks, counting how often it opened one.
fn stub_handle(
    refuse: u32,
    config: &ReadConfig,
) -> (
    ArchiveHandle<impl FnMut() -> SevenZResult<StubStream>>,
    Rc<Cell<u32>>,
) {
    let opened = Rc::new(Cell::new(0));
    let refuse_seeks = Rc::new(Cell::new(refuse));
    let counter = Rc::clone(&opened);
    let factory = move || {
        counter.set(counter.get() + 1);
        return Ok(StubStream {
            data: Cursor::new(PAYLOAD.to_vec()),
            refuse_seeks: Rc::clone(&refuse_seeks),
        });
    };
    return (
        ArchiveHandle::from_parts(stub_archive(), factory, config),
        opened,
    );
}

#[test]
fn reads_in_order_with_one_stream() {
    let (mut handle, opened) = stub_handle(0, &ReadConfig::default());
    let files = handle.files().to_vec();
    assert_eq!(handle.get_content(&files[0]).unwrap(), b"test_a\n");
    assert_eq!(handle.get_content(&files[1]).unwrap(), b"test_b\n");
    assert_eq!(opened.get(), 1);
}

#[test]
fn reopens_when_seeking_backwards() {
    let (mut handle, opened) = stub_handle(0, &ReadConfig::default());
    assert_eq!(handle.get_content_at(1).unwrap(), b"test_b\n");
    assert_eq!(handle.get_content_at(0).unwrap(), b"test_a\n");
    assert_eq!(opened.get(), 2);
}

#[test]
fn single_seek_failure_is_retried() {
    let (mut handle, opened) = stub_handle(1, &ReadConfig::default());
    assert_eq!(handle.get_content_at(1).unwrap(), b"test_b\n");
    assert_eq!(opened.get(), 2);
}

#[test]
fn repeated_seek_failure_propagates() {
    let (mut handle, opened) = stub_handle(u32::MAX, &ReadConfig::default());
    let err = handle.get_content_at(0).unwrap_err();
    assert!(matches!(err, SevenZError::SeekUnsupported { offset: 0 }));
    assert_eq!(err.kind(), SevenZErrorKind::DecodeFailure);
    // One retry, no more
    assert_eq!(opened.get(), 2);
}

#[test]
fn stream_less_files_need_no_decoder() {
    let (mut handle, opened) = stub_handle(u32::MAX, &ReadConfig::default());
    assert_eq!(handle.get_content_at(2).unwrap(), Vec::<u8>::new());
    assert_eq!(opened.get(), 0);
}

#[test]
fn checksums() {
    let (mut handle, _) = stub_handle(0, &ReadConfig::default());
    let bad = file("test_a", 0, 7, Some(0xdeadbeef));
    let err = handle.get_content(&bad).unwrap_err();
    assert!(matches!(
        err,
        SevenZError::ChecksumMismatch {
            what: "file",
            stored: 0xdeadbeef,
            computed: 0x7c8ec20e
        }
    ));

    let (mut handle, _) = stub_handle(0, &ReadConfig::without_checksums());
    assert_eq!(handle.get_content(&bad).unwrap(), b"test_a\n");
}

#[test]
fn truncated_payload() {
    let (mut handle, _) = stub_handle(0, &ReadConfig::default());
    let err = handle.get_content(&file("long", 7, 100, None)).unwrap_err();
    assert_eq!(err.kind(), SevenZErrorKind::DecodeFailure);
}

#[test]
fn lookup() {
    let (mut handle, _) = stub_handle(0, &ReadConfig::default());
    assert!(!handle.is_empty());
    assert_eq!(handle.find("test_b").map(|f| f.offset), Some(7));
    assert!(handle.find("nope").is_none());
    assert!(matches!(
        handle.get_content_at(3),
        Err(SevenZError::NoSuchFileName(_))
    ));
}

#[test]
fn entries_in_order() {
    let (mut handle, opened) = stub_handle(0, &ReadConfig::default());
    let entries: Vec<(String, Vec<u8>)> = handle
        .entries()
        .map(|entry| entry.map(|(f, data)| (f.name, data)))
        .collect::<SevenZResult<_>>()
        .unwrap();
    assert_eq!(
        entries,
        vec![
            (String::from("test_a"), b"test_a\n".to_vec()),
            (String::from("test_b"), b"test_b\n".to_vec()),
            (String::from("dir"), vec![]),
        ]
    );
    assert_eq!(opened.get(), 1);
}

#[test]
fn config_defaults() {
    let config = ReadConfig::new();
    assert!(config.verify_checksums);
    assert_eq!(config.max_header_size, 64 * 1024 * 1024);
    assert!(!ReadConfig::without_checksums().verify_checksums);
}
