use core::convert::TryFrom;

/// One-byte tags that open (and with `End`, close) every header section.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyID {
    End = 0x00,
    Header = 0x01,
    ArchiveProperties = 0x02,
    AdditionalStreamsInfo = 0x03,
    MainStreamsInfo = 0x04,
    FilesInfo = 0x05,
    PackInfo = 0x06,
    UnPackInfo = 0x07,
    SubStreamsInfo = 0x08,
    Size = 0x09,
    CRC = 0x0A,
    Folder = 0x0B,
    CodersUnPackSize = 0x0C,
    NumUnPackStream = 0x0D,
    EmptyStream = 0x0E,
    EmptyFile = 0x0F,
    Anti = 0x10,
    Name = 0x11,
    CTime = 0x12,
    ATime = 0x13,
    MTime = 0x14,
    WinAttributes = 0x15,
    Comment = 0x16,
    /// The header is itself packed, and what follows describes where.
    EncodedHeader = 0x17,
    StartPos = 0x18,
    /// Padding inside `FilesInfo`.
    Dummy = 0x19,
}

/// Indexed by tag value.
const BY_VALUE: [PropertyID; 26] = {
    use PropertyID::*;
    [
        End,
        Header,
        ArchiveProperties,
        AdditionalStreamsInfo,
        MainStreamsInfo,
        FilesInfo,
        PackInfo,
        UnPackInfo,
        SubStreamsInfo,
        Size,
        CRC,
        Folder,
        CodersUnPackSize,
        NumUnPackStream,
        EmptyStream,
        EmptyFile,
        Anti,
        Name,
        CTime,
        ATime,
        MTime,
        WinAttributes,
        Comment,
        EncodedHeader,
        StartPos,
        Dummy,
    ]
};

impl TryFrom<u8> for PropertyID {
    /// The unknown tag is handed back.
    type Error = u8;
    fn try_from(b: u8) -> Result<Self, Self::Error> {
        return BY_VALUE.get(usize::from(b)).copied().ok_or(b);
    }
}
