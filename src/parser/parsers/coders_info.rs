use super::*;

use crate::codec::CodecId;

const CODER_ID_SIZE_MASK: u8 = 0x0F;
const CODER_IS_COMPLEX: u8 = 0x10;
const CODER_HAS_ATTRIBUTES: u8 = 0x20;
const CODER_HAS_ALTERNATIVES: u8 = 0x80;

/// Parse `UnpackInfo`, which must describe exactly one folder holding a single LZMA coder.
pub fn unpack_info<R: Read + Seek>(input: &mut BitReader<R>) -> SevenZResult<UnpackInfo> {
    expect_property(input, PropertyID::Folder)?;
    let num_folders = input.read_varint()?;
    if num_folders != 1 {
        return Err(SevenZError::unsupported(format!("{} folders", num_folders)));
    }
    if input.read_u8()? != 0 {
        return Err(SevenZError::unsupported("external folder definitions"));
    }
    let coder = folder(input)?;

    expect_property(input, PropertyID::CodersUnPackSize)?;
    let unpack_size = input.read_varint()?;

    let mut id = input.read_u8()?;
    let mut crc = None;
    if id == PropertyID::CRC as u8 {
        let defined = input.read_all_or_bits(1)?;
        if defined[0] {
            crc = Some(input.read_u32()?);
        }
        id = input.read_u8()?;
    }
    check_property(id, PropertyID::End)?;

    return Ok(UnpackInfo {
        coder,
        unpack_size,
        crc,
    });
}

/// Parse a folder description, returning its only coder.
pub fn folder<R: Read + Seek>(input: &mut BitReader<R>) -> SevenZResult<Coder> {
    let num_coders = input.read_varint()?;
    if num_coders != 1 {
        return Err(SevenZError::unsupported(format!(
            "folders with {} coders",
            num_coders
        )));
    }

    let flags = input.read_u8()?;
    if flags & CODER_HAS_ALTERNATIVES != 0 {
        return Err(SevenZError::unsupported("alternative coder methods"));
    }
    let raw_id = input.read_bytes(u64::from(flags & CODER_ID_SIZE_MASK))?;
    let id = CodecId::from(raw_id.as_slice());
    if id != CodecId::Lzma {
        return Err(SevenZError::unsupported(id.to_string()));
    }
    if flags & CODER_IS_COMPLEX != 0 {
        return Err(SevenZError::unsupported("coders with several streams"));
    }
    if flags & CODER_HAS_ATTRIBUTES == 0 {
        return Err(SevenZError::unsupported("LZMA coder without properties"));
    }

    let properties_len = input.read_varint()?;
    let properties = input.read_bytes(properties_len)?;
    return Ok(Coder { id, properties });
}
