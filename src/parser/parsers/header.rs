use super::*;

use either::*;
use log::debug;

/// Parse a next header: either a plain header, or the streams info of a packed one.
pub fn header_or_encoded<R: Read + Seek>(
    input: &mut BitReader<R>,
) -> SevenZResult<Either<Header, StreamsInfo>> {
    let id = input.read_u8()?;
    if id == PropertyID::Header as u8 {
        return Ok(Left(header(input)?));
    }
    if id == PropertyID::EncodedHeader as u8 {
        debug!("Header is encoded");
        return Ok(Right(streams_info(input)?));
    }
    return Err(SevenZError::TagMismatch {
        expected: PropertyID::Header,
        observed: id,
    });
}

/// Parse a plain header, after its `Header` tag.
pub fn header<R: Read + Seek>(input: &mut BitReader<R>) -> SevenZResult<Header> {
    let mut id = input.read_u8()?;
    if id == PropertyID::ArchiveProperties as u8 {
        return Err(SevenZError::unsupported("archive properties"));
    }
    if id == PropertyID::AdditionalStreamsInfo as u8 {
        return Err(SevenZError::unsupported("additional streams"));
    }

    let mut main_streams = None;
    if id == PropertyID::MainStreamsInfo as u8 {
        main_streams = Some(streams_info(input)?);
        id = input.read_u8()?;
    }

    let mut files = Vec::new();
    if id == PropertyID::FilesInfo as u8 {
        let (sizes, digests) = match &main_streams {
            Some(streams) => (streams.substream_sizes(), streams.substream_digests()),
            None => (vec![], vec![]),
        };
        files = files_info(input, &sizes, &digests)?;
        id = input.read_u8()?;
    }
    check_property(id, PropertyID::End)?;

    return Ok(Header {
        main_streams,
        files,
    });
}
