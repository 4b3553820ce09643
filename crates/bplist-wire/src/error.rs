/// Low-level framing errors raised while reading raw bplist bytes.
///
/// Every variant that points into the input carries an absolute byte
/// `offset` measured from the start of the payload, so a failing
/// fixture can be located with a hex dump.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete field could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// The first 8 bytes were not `bplist00`.
    #[error("invalid magic: expected 0x62706C6973743030 (\"bplist00\"), got {found:#018X}")]
    InvalidMagic { found: u64 },

    /// Input too short to hold both the header and the 32-byte trailer.
    #[error("input of {len} bytes is too small to be a bplist")]
    TooShort { len: usize },

    /// The trailer's offset-table offset does not bound a readable
    /// object-table region between the header and the trailer.
    #[error("object table region 8..{offset_table_offset} does not fit in {len} bytes")]
    InvalidRegion { offset_table_offset: u64, len: usize },

    /// An integer field used a byte width this decoder does not support.
    #[error("unsupported {field} width of {width} bytes at offset {offset}")]
    UnsupportedWidth {
        field: &'static str,
        width: usize,
        offset: usize,
    },

    /// An extended count was not introduced by an integer marker.
    #[error("invalid count marker {marker:#04X} at offset {offset}: expected 0x1n")]
    InvalidCountMarker { marker: u8, offset: usize },

    /// I/O error while reading the source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
