use super::*;

use log::debug;

/// Parse a `StreamsInfo` body, after its opening tag.
pub fn streams_info<R: Read + Seek>(input: &mut BitReader<R>) -> SevenZResult<StreamsInfo> {
    expect_property(input, PropertyID::PackInfo)?;
    let pack_info = pack_info(input)?;
    expect_property(input, PropertyID::UnPackInfo)?;
    let unpack_info = unpack_info(input)?;

    let mut id = input.read_u8()?;
    let mut substreams = None;
    if id == PropertyID::SubStreamsInfo as u8 {
        substreams = Some(substreams_info(input, unpack_info.unpack_size)?);
        id = input.read_u8()?;
    }
    check_property(id, PropertyID::End)?;

    debug!(
        "Streams: packed stream at {} ({:?} bytes), {} unpacks to {} bytes in {} substreams",
        pack_info.pack_pos,
        pack_info.size,
        unpack_info.coder.id,
        unpack_info.unpack_size,
        substreams.as_ref().map_or(1, |ss| ss.unpack_sizes.len()),
    );
    return Ok(StreamsInfo {
        pack_info,
        unpack_info,
        substreams_info: substreams,
    });
}

pub fn pack_info<R: Read + Seek>(input: &mut BitReader<R>) -> SevenZResult<PackInfo> {
    let pack_pos = input.read_varint()?;
    let num_pack_streams = input.read_varint()?;
    if num_pack_streams != 1 {
        return Err(SevenZError::unsupported(format!(
            "{} packed streams",
            num_pack_streams
        )));
    }

    let mut id = input.read_u8()?;
    let mut size = None;
    if id == PropertyID::Size as u8 {
        size = Some(input.read_varint()?);
        id = input.read_u8()?;
    }
    if id == PropertyID::CRC as u8 {
        return Err(SevenZError::unsupported("packed stream digests"));
    }
    check_property(id, PropertyID::End)?;

    return Ok(PackInfo { pack_pos, size });
}

/// Parse `SubStreamsInfo` for the single folder, which unpacks to `folder_size` bytes.
pub fn substreams_info<R: Read + Seek>(
    input: &mut BitReader<R>,
    folder_size: u64,
) -> SevenZResult<SubStreamsInfo> {
    expect_property(input, PropertyID::NumUnPackStream)?;
    let count = input.read_varint_usize()?;
    if count == 0 {
        return Err(SevenZError::unsupported("folders without substreams"));
    }

    expect_property(input, PropertyID::Size)?;
    let mut unpack_sizes = Vec::new();
    let mut sum: u64 = 0;
    for _ in 1..count {
        let size = input.read_varint()?;
        sum = sum.checked_add(size).ok_or(SevenZError::BoundsViolation {
            limit: folder_size,
            position: u64::MAX,
        })?;
        unpack_sizes.push(size);
    }
    // The last size is implied
    let last = folder_size
        .checked_sub(sum)
        .ok_or(SevenZError::BoundsViolation {
            limit: folder_size,
            position: sum,
        })?;
    unpack_sizes.push(last);

    expect_property(input, PropertyID::CRC)?;
    let defined = input.read_all_or_bits(count)?;
    let mut digests = Vec::with_capacity(count);
    // A set bit means the digest is present
    for has_digest in defined.iter().by_vals() {
        if has_digest {
            digests.push(Some(input.read_u32()?));
        } else {
            digests.push(None);
        }
    }
    expect_property(input, PropertyID::End)?;

    return Ok(SubStreamsInfo {
        unpack_sizes,
        digests,
    });
}
