use bplist_wire::WireError;

/// Errors that can occur while decoding a bplist payload.
///
/// Any of these aborts the whole decode: there are no partial tables.
/// Problems with the object graph itself (dangling or cyclic
/// references) are not decode errors; they surface later as
/// [`ResolveError`](bplist_types::ResolveError) when a container is
/// resolved.
///
/// ```text
///   DecodeError
///   ├── InvalidHeader(WireError)   ← missing or wrong "bplist00" magic
///   ├── InvalidTrailer(WireError)  ← input too short, bad region bounds
///   ├── UndefinedMarker            ← marker class/info with no meaning
///   ├── Wire(WireError)            ← truncated element, bad width, bad count
///   └── Io(std::io::Error)         ← read/seek failure on the source
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The 8-byte header failed validation.
    #[error("invalid header: {0}")]
    InvalidHeader(WireError),

    /// The 32-byte trailer could not be read or does not describe a
    /// usable object-table region.
    #[error("invalid trailer: {0}")]
    InvalidTrailer(WireError),

    /// A marker byte whose class (or, for singleton and date markers,
    /// low nibble) is not defined by the format.
    #[error("undefined marker {marker:#04X} at offset {offset}")]
    UndefinedMarker { marker: u8, offset: usize },

    /// A framing error inside the object table: truncated element,
    /// unsupported integer/real/UID/count width, or a count extension
    /// that is not an integer.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The underlying source failed, including a seekable source that
    /// could not be rewound.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bytes do not form a payload this decoder accepts.
    Format,
    /// Reading the source failed.
    Io,
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_)
            | Self::Wire(WireError::Io(_))
            | Self::InvalidHeader(WireError::Io(_))
            | Self::InvalidTrailer(WireError::Io(_)) => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }

    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}
