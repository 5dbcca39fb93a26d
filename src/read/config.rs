/// Options for opening an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadConfig {
    /// Compare stored CRCs (of the next header, of an encoded header and of each file's data)
    /// against the data actually read.
    ///
    /// The start header CRC is checked regardless.
    pub verify_checksums: bool,
    /// Largest header, packed or decoded, that will be loaded into memory.
    pub max_header_size: u64,
}

impl Default for ReadConfig {
    fn default() -> Self {
        return Self {
            verify_checksums: true,
            max_header_size: 64 * 1024 * 1024,
        };
    }
}

impl ReadConfig {
    pub fn new() -> Self {
        return Self::default();
    }

    /// Read archives the way the format's reference reader does, trusting stored CRCs blindly.
    pub fn without_checksums() -> Self {
        return Self {
            verify_checksums: false,
            ..Self::default()
        };
    }
}
