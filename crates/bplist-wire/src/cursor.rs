use crate::error::WireError;
use crate::marker::{Marker, class};
use crate::refs::RefWidth;

/// Largest power-of-two integer width (`2^3` = 8 bytes) this decoder reads.
pub const MAX_INT_WIDTH_EXP: u8 = 3;

/// Forward-only reader over a slice of the payload.
///
/// `base` is the absolute payload offset of `buf[0]`, so every error
/// reports a position that can be found in the input rather
/// than an index into the sub-slice.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8], base: usize) -> Self {
        Self { buf, pos: 0, base }
    }

    /// Absolute payload offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read one byte.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] when the cursor is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or(WireError::UnexpectedEof {
                offset: self.offset(),
            })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Borrow the next `n` bytes and advance past them.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(WireError::UnexpectedEof {
                offset: self.base + self.buf.len(),
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read a big-endian unsigned integer of `width` bytes (1..=8).
    ///
    /// # Errors
    ///
    /// - [`WireError::UnsupportedWidth`] if `width` is 0 or wider than 8.
    /// - [`WireError::UnexpectedEof`] if the bytes run out.
    pub fn read_be_unsigned(&mut self, width: usize, field: &'static str) -> Result<u64, WireError> {
        if width == 0 || width > 8 {
            return Err(WireError::UnsupportedWidth {
                field,
                width,
                offset: self.offset(),
            });
        }
        let bytes = self.take(width)?;
        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Read a plist integer of `width` bytes (1..=8). Narrower widths
    /// are unsigned and zero-extended; only the 8-byte form carries a
    /// sign, as two's complement.
    ///
    /// # Errors
    ///
    /// Same as [`read_be_unsigned`](Self::read_be_unsigned).
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_be_int(&mut self, width: usize, field: &'static str) -> Result<i64, WireError> {
        let raw = self.read_be_unsigned(width, field)?;
        Ok(raw as i64)
    }

    /// Read an extended count: an integer marker (`0x1n`) followed by
    /// `2^n` big-endian bytes.
    ///
    /// # Errors
    ///
    /// - [`WireError::InvalidCountMarker`] if the marker's class is not INT.
    /// - [`WireError::UnsupportedWidth`] if `n` is greater than 3.
    /// - [`WireError::UnexpectedEof`] if the bytes run out.
    pub fn read_count(&mut self) -> Result<usize, WireError> {
        let marker_offset = self.offset();
        let marker = Marker::from_raw(self.read_u8()?);
        if marker.class() != class::INT {
            return Err(WireError::InvalidCountMarker {
                marker: marker.raw(),
                offset: marker_offset,
            });
        }
        if marker.info() > MAX_INT_WIDTH_EXP {
            return Err(WireError::UnsupportedWidth {
                field: "count",
                width: 1usize << marker.info(),
                offset: marker_offset,
            });
        }
        let value = self.read_be_unsigned(1usize << marker.info(), "count")?;
        usize::try_from(value).map_err(|_| WireError::UnsupportedWidth {
            field: "count",
            width: 8,
            offset: marker_offset,
        })
    }

    /// Read `count` object references at `width` and return them as
    /// table indices. The byte length is checked before anything is
    /// allocated, so a hostile count cannot trigger a huge allocation.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if the list is truncated.
    pub fn read_refs(&mut self, count: usize, width: RefWidth) -> Result<Vec<usize>, WireError> {
        let len = count
            .checked_mul(width.bytes())
            .ok_or(WireError::UnexpectedEof {
                offset: self.base + self.buf.len(),
            })?;
        let bytes = self.take(len)?;
        Ok(bytes
            .chunks_exact(width.bytes())
            .map(|chunk| chunk.iter().fold(0usize, |acc, &b| (acc << 8) | usize::from(b)))
            .collect())
    }
}
