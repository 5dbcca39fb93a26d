use super::*;

use crate::parser::SevenZErrorKind;

use std::io::{Cursor, ErrorKind, Read, Seek, SeekFrom};

const BASIC_ARCHIVE: &[u8] = include_bytes!("../../testdata/basic.7z");

/// The packed payload of `basic.7z` and what it decodes to.
fn basic_payload() -> (&'static [u8], &'static [u8]) {
    return (&BASIC_ARCHIVE[32..48], b"test_a\ntest_b\n");
}

fn basic_params() -> LzmaParams {
    return LzmaParams::from_properties(&[0x5D, 0x00, 0x00, 0x01, 0x00]).unwrap();
}

#[test]
fn codec_ids() {
    assert_eq!(CodecId::from(&[0x03, 0x01, 0x01][..]), CodecId::Lzma);
    assert_eq!(CodecId::from(&[0x21][..]), CodecId::Lzma2);
    assert_eq!(CodecId::from(&[0x00][..]), CodecId::Copy);
    assert_eq!(
        CodecId::from(&[0x06, 0xF1, 0x07, 0x01][..]),
        CodecId::Aes256Sha256
    );
    assert_eq!(
        CodecId::from(&[0x7F, 0x01][..]),
        CodecId::Unknown(vec![0x7F, 0x01])
    );
    assert_eq!(CodecId::BZip2.to_string(), "codec BZip2");
    assert_eq!(CodecId::Unknown(vec![0x7F]).to_string(), "codec [7f]");
}

#[test]
fn lzma_params_default_options() {
    assert_eq!(
        basic_params(),
        LzmaParams {
            lc: 3,
            lp: 0,
            pb: 2,
            dict_size: 1 << 16,
        }
    );

    let params = LzmaParams::from_properties(&[4 + 45 * 4, 0, 0, 0, 0x40]).unwrap();
    assert_eq!((params.lc, params.lp, params.pb), (4, 0, 4));
    assert_eq!(params.dict_size, 1 << 30);
}

#[test]
fn lzma_params_rejected() {
    let test_cases: &[&[u8]] = &[
        // lc = 4, lp = 1
        &[4 + 9, 0, 0, 1, 0],
        // pb = 5
        &[225, 0, 0, 1, 0],
        // Dictionary too small
        &[0x5D, 0xFF, 0x0F, 0, 0],
        // Dictionary at the upper bound
        &[0x5D, 0, 0, 0, 0x60],
        &[0x5D, 0, 0, 1],
        &[0x5D, 0, 0, 1, 0, 0],
        &[],
    ];
    for input in test_cases {
        let err = LzmaParams::from_properties(input).unwrap_err();
        assert!(
            matches!(err, SevenZError::InvalidCodecProperties(_)),
            "{:x?} gave {:?}",
            input,
            err
        );
        assert_eq!(err.kind(), SevenZErrorKind::FormatMismatch);
    }

    // Bounds themselves
    assert!(LzmaParams::from_properties(&[0x5D, 0x00, 0x10, 0, 0]).is_ok());
    assert!(LzmaParams::from_properties(&[0x5D, 0xFF, 0xFF, 0xFF, 0x5F]).is_ok());
}

#[test]
fn lzma_stream_decodes() {
    let (packed, expected) = basic_payload();
    let mut stream = LzmaStream::new(Cursor::new(packed), &basic_params(), 14).unwrap();
    assert_eq!(stream.len(), 14);
    let mut out = Vec::new();
    stream.read_to_end(&mut out).unwrap();
    assert_eq!(out, expected);
    assert_eq!(stream.position(), 14);
}

#[test]
fn lzma_stream_seeks_forward_only() {
    let (packed, _) = basic_payload();
    let mut stream = LzmaStream::new(Cursor::new(packed), &basic_params(), 14).unwrap();

    assert_eq!(stream.seek(SeekFrom::Start(7)).unwrap(), 7);
    let mut name = [0u8; 6];
    stream.read_exact(&mut name).unwrap();
    assert_eq!(&name, b"test_b");

    // Seeking to where we already are is fine
    assert_eq!(stream.seek(SeekFrom::Current(0)).unwrap(), 13);

    let err = stream.seek(SeekFrom::Start(0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    let err = stream.seek(SeekFrom::End(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}
