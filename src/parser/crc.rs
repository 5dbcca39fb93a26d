//! This module exposes the CRC algorithm used by 7zip.

use crc::{Crc, CRC_32_ISO_HDLC};

use super::err::{SevenZError, SevenZResult};

/// 7zip uses the common reflected CRC-32 (as in zip and PNG).
const SEVENZ_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

pub fn sevenz_crc(input: &[u8]) -> u32 {
    let mut digest = SEVENZ_CRC.digest();
    digest.update(input);
    return digest.finalize();
}

/// Compare the CRC of `data` against a stored value.
pub fn verify(what: &'static str, stored: u32, data: &[u8]) -> SevenZResult<()> {
    let computed = sevenz_crc(data);
    if computed != stored {
        return Err(SevenZError::ChecksumMismatch {
            what,
            stored,
            computed,
        });
    }
    return Ok(());
}

#[cfg(test)]
mod test {
    #[test]
    fn check_value() {
        assert_eq!(super::sevenz_crc(b"123456789"), 0xCBF43926);
    }

    #[test]
    fn verify_reports_both_values() {
        let err = super::verify("start header", 1, b"test_a\n").unwrap_err();
        match err {
            super::SevenZError::ChecksumMismatch {
                what,
                stored,
                computed,
            } => {
                assert_eq!(what, "start header");
                assert_eq!(stored, 1);
                assert_eq!(computed, 0x7c8ec20e);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
