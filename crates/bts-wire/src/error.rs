#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete header could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// The magic tag in the header's first word did not match `0x656174`.
    #[error("bad trace magic: expected tag 0x656174xx, got {found:#010X}")]
    BadMagic { found: u32 },

    /// The version byte in the magic word is not the supported one.
    #[error("unsupported trace format version {found:#04X}, expected 0x07")]
    UnsupportedVersion { found: u8 },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
