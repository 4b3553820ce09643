use std::ops::Range;

use crate::error::WireError;

/// Magic header: ASCII "bplist00".
///
/// On the wire this is two big-endian words, `0x62706C69` ("bpli") and
/// `0x73743030` ("st00"). Compared as raw bytes so byte order never
/// comes into it.
pub const MAGIC: [u8; 8] = *b"bplist00";

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 8;

/// Size of the fixed trailer at the end of every payload.
pub const TRAILER_SIZE: usize = 32;

/// Validate the 8-byte magic at the start of `buf`.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] if `buf` is shorter than [`HEADER_SIZE`].
/// - [`WireError::InvalidMagic`] if the bytes are not `bplist00`.
pub fn check_magic(buf: &[u8]) -> Result<(), WireError> {
    let head = buf
        .get(..HEADER_SIZE)
        .ok_or(WireError::UnexpectedEof { offset: buf.len() })?;

    if head != MAGIC {
        let mut word = [0u8; 8];
        word.copy_from_slice(head);
        return Err(WireError::InvalidMagic {
            found: u64::from_be_bytes(word),
        });
    }
    Ok(())
}

/// The 32-byte trailer closing every bplist payload.
///
/// ```text
/// ┌────────┬─────────┬───────────────────────────────────────┐
/// │ Offset │ Size    │ Description                           │
/// ├────────┼─────────┼───────────────────────────────────────┤
/// │ 0x00   │ 6 bytes │ Unused                                │
/// │ 0x06   │ 1 byte  │ Offset-table int size                 │
/// │ 0x07   │ 1 byte  │ Object-ref size                       │
/// │ 0x08   │ 8 bytes │ Number of objects (BE)                │
/// │ 0x10   │ 8 bytes │ Top object index (BE)                 │
/// │ 0x18   │ 8 bytes │ Offset-table offset (BE)              │
/// └────────┴─────────┴───────────────────────────────────────┘
/// ```
///
/// Only `num_objects` and `offset_table_offset` drive decoding. The
/// offset table itself is never read: the decoder scans the region
/// between the header and `offset_table_offset` linearly. The other
/// fields are kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trailer {
    pub offset_int_size: u8,
    pub object_ref_size: u8,
    pub num_objects: u64,
    pub top_object: u64,
    pub offset_table_offset: u64,
}

impl Trailer {
    /// Parse the trailer from the last [`TRAILER_SIZE`] bytes of a
    /// complete payload.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::TooShort`] if `input` cannot hold a header
    /// and a trailer.
    pub fn read_from(input: &[u8]) -> Result<Self, WireError> {
        if input.len() < HEADER_SIZE + TRAILER_SIZE {
            return Err(WireError::TooShort { len: input.len() });
        }
        let mut raw = [0u8; TRAILER_SIZE];
        raw.copy_from_slice(&input[input.len() - TRAILER_SIZE..]);
        Ok(Self::from_bytes(&raw))
    }

    /// Parse a trailer from exactly 32 raw bytes.
    pub fn from_bytes(raw: &[u8; TRAILER_SIZE]) -> Self {
        Self {
            offset_int_size: raw[6],
            object_ref_size: raw[7],
            num_objects: be_u64(&raw[8..16]),
            top_object: be_u64(&raw[16..24]),
            offset_table_offset: be_u64(&raw[24..32]),
        }
    }

    /// The byte range of the object-table region inside a payload of
    /// `len` bytes: from the end of the header up to (excluding) the
    /// offset table.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidRegion`] if the offset table would
    /// start inside the header or reach into the trailer.
    pub fn object_table_region(&self, len: usize) -> Result<Range<usize>, WireError> {
        let invalid = || WireError::InvalidRegion {
            offset_table_offset: self.offset_table_offset,
            len,
        };
        let end = usize::try_from(self.offset_table_offset).map_err(|_| invalid())?;
        if end < HEADER_SIZE || end > len.saturating_sub(TRAILER_SIZE) {
            return Err(invalid());
        }
        Ok(HEADER_SIZE..end)
    }
}

fn be_u64(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(bytes);
    u64::from_be_bytes(word)
}
