use crate::codec::CodecId;

#[derive(Debug, Clone, PartialEq)]
pub struct PackInfo {
    /// Offset of the packed stream, relative to the end of the signature header.
    pub pack_pos: u64,
    pub size: Option<u64>,
}

/// The only coder of the only folder.
#[derive(Debug, Clone, PartialEq)]
pub struct Coder {
    pub id: CodecId,
    pub properties: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnpackInfo {
    pub coder: Coder,
    pub unpack_size: u64,
    pub crc: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubStreamsInfo {
    pub unpack_sizes: Vec<u64>,
    /// One entry per substream, `None` where no digest is stored.
    pub digests: Vec<Option<u32>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamsInfo {
    pub pack_info: PackInfo,
    pub unpack_info: UnpackInfo,
    pub substreams_info: Option<SubStreamsInfo>,
}

impl StreamsInfo {
    /// Sizes of the substreams, in folder order.
    ///
    /// Without a `SubStreamsInfo` section the folder holds a single substream.
    pub fn substream_sizes(&self) -> Vec<u64> {
        match &self.substreams_info {
            Some(ss) => return ss.unpack_sizes.clone(),
            None => return vec![self.unpack_info.unpack_size],
        }
    }

    pub fn substream_digests(&self) -> Vec<Option<u32>> {
        match &self.substreams_info {
            Some(ss) => return ss.digests.clone(),
            None => return vec![self.unpack_info.crc],
        }
    }
}
