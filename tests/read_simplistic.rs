const BASIC_ARCHIVE: &[u8] = include_bytes!("../testdata/basic.7z");
const PLAIN_HEADER_ARCHIVE: &[u8] = include_bytes!("../testdata/plain-header.7z");

#[test]
fn unpack_single_file() {
    let res = sevenz_slim::extract_file("test_b", BASIC_ARCHIVE).unwrap();
    assert_eq!(res, b"test_b\n");
}

#[test]
fn unpack_file_in_directory() {
    let res = sevenz_slim::extract_file("docs/c.txt", PLAIN_HEADER_ARCHIVE).unwrap();
    assert_eq!(res, b"charlie was here\n");
}

#[test]
fn unpack_missing_file() {
    let err = sevenz_slim::extract_file("test_c", BASIC_ARCHIVE).unwrap_err();
    assert!(matches!(err, sevenz_slim::SevenZError::NoSuchFileName(ref name) if name == "test_c"));
    assert_eq!(err.kind(), sevenz_slim::SevenZErrorKind::NotFound);
}
