//! Leaf decoders: one routine per scalar marker class.
//!
//! Each routine is entered with the marker byte already consumed and
//! the cursor positioned on the element's payload.

use bplist_types::{Element, PlistDate};
use bplist_wire::cursor::MAX_INT_WIDTH_EXP;
use bplist_wire::marker::{self, Marker, singleton};
use bplist_wire::{ByteCursor, WireError};

use crate::error::DecodeError;

/// Widest UID the decoder accepts, in bytes.
const MAX_UID_BYTES: usize = 4;

/// Null, booleans and the fill byte. Fill yields `None`: it occupies a
/// byte in the stream but no slot in the table.
pub(crate) fn decode_singleton(marker: Marker, offset: usize) -> Result<Option<Element>, DecodeError> {
    match marker.info() {
        singleton::NULL => Ok(Some(Element::Null)),
        singleton::FALSE => Ok(Some(Element::Bool(false))),
        singleton::TRUE => Ok(Some(Element::Bool(true))),
        singleton::FILL => Ok(None),
        _ => Err(DecodeError::UndefinedMarker {
            marker: marker.raw(),
            offset,
        }),
    }
}

/// Big-endian integer over `2^info` bytes: unsigned below 8 bytes,
/// two's complement at 8.
pub(crate) fn decode_int(marker: Marker, cursor: &mut ByteCursor<'_>, offset: usize) -> Result<Element, DecodeError> {
    if marker.info() > MAX_INT_WIDTH_EXP {
        return Err(WireError::UnsupportedWidth {
            field: "int",
            width: 1usize << marker.info(),
            offset,
        }
        .into());
    }
    let value = cursor.read_be_int(1usize << marker.info(), "int")?;
    Ok(Element::Int(value))
}

/// IEEE 754 real: 4 bytes for `Float32`, 8 for `Float64`.
pub(crate) fn decode_real(marker: Marker, cursor: &mut ByteCursor<'_>, offset: usize) -> Result<Element, DecodeError> {
    match 1usize << marker.info() {
        4 => {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(cursor.take(4)?);
            Ok(Element::Float32(f32::from_be_bytes(raw)))
        }
        8 => Ok(Element::Float64(read_f64(cursor)?)),
        width => Err(WireError::UnsupportedWidth {
            field: "real",
            width,
            offset,
        }
        .into()),
    }
}

/// Date: only `0x33` is defined, followed by an 8-byte float.
pub(crate) fn decode_date(marker: Marker, cursor: &mut ByteCursor<'_>, offset: usize) -> Result<Element, DecodeError> {
    if marker.raw() != marker::DATE {
        return Err(DecodeError::UndefinedMarker {
            marker: marker.raw(),
            offset,
        });
    }
    Ok(Element::Date(PlistDate::from_seconds(read_f64(cursor)?)))
}

pub(crate) fn decode_bytes(count: usize, cursor: &mut ByteCursor<'_>) -> Result<Element, DecodeError> {
    Ok(Element::Bytes(cursor.take(count)?.to_vec()))
}

/// One byte per character. Bytes outside 7-bit ASCII become U+FFFD.
pub(crate) fn decode_ascii(count: usize, cursor: &mut ByteCursor<'_>) -> Result<Element, DecodeError> {
    let text = cursor
        .take(count)?
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
        .collect();
    Ok(Element::AsciiString(text))
}

/// `count` big-endian UTF-16 code units. Unpaired surrogates become
/// U+FFFD.
pub(crate) fn decode_utf16(count: usize, cursor: &mut ByteCursor<'_>) -> Result<Element, DecodeError> {
    let offset = cursor.offset();
    let len = count
        .checked_mul(2)
        .ok_or(WireError::UnexpectedEof { offset })?;
    let units = cursor
        .take(len)?
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    let text = char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    Ok(Element::UnicodeString(text))
}

/// Unsigned big-endian UID over `info + 1` bytes, at most 4.
pub(crate) fn decode_uid(marker: Marker, cursor: &mut ByteCursor<'_>, offset: usize) -> Result<Element, DecodeError> {
    let width = usize::from(marker.info()) + 1;
    if width > MAX_UID_BYTES {
        return Err(WireError::UnsupportedWidth {
            field: "uid",
            width,
            offset,
        }
        .into());
    }
    let raw = cursor.read_be_unsigned(width, "uid")?;
    let uid = u32::try_from(raw).map_err(|_| WireError::UnsupportedWidth {
        field: "uid",
        width,
        offset,
    })?;
    Ok(Element::Uid(uid))
}

/// Element length: the inline low nibble, or an extended count when
/// the nibble is `0xF`.
pub(crate) fn read_length(marker: Marker, cursor: &mut ByteCursor<'_>) -> Result<usize, DecodeError> {
    if marker.has_extended_count() {
        Ok(cursor.read_count()?)
    } else {
        Ok(usize::from(marker.info()))
    }
}

fn read_f64(cursor: &mut ByteCursor<'_>) -> Result<f64, WireError> {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(cursor.take(8)?);
    Ok(f64::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(bytes: &[u8]) -> ByteCursor<'_> {
        ByteCursor::new(bytes, 9)
    }

    #[test]
    fn singletons() {
        assert_eq!(decode_singleton(Marker::from_raw(0x00), 8).unwrap(), Some(Element::Null));
        assert_eq!(
            decode_singleton(Marker::from_raw(0x08), 8).unwrap(),
            Some(Element::Bool(false))
        );
        assert_eq!(
            decode_singleton(Marker::from_raw(0x09), 8).unwrap(),
            Some(Element::Bool(true))
        );
        assert_eq!(decode_singleton(Marker::from_raw(0x0F), 8).unwrap(), None);
    }

    #[test]
    fn undefined_singleton() {
        let result = decode_singleton(Marker::from_raw(0x01), 8);
        assert!(matches!(
            result,
            Err(DecodeError::UndefinedMarker { marker: 0x01, offset: 8 })
        ));
    }

    #[test]
    fn int_widths() {
        let mut c = cursor(&[0xC8]);
        assert_eq!(decode_int(Marker::from_raw(0x10), &mut c, 8).unwrap(), Element::Int(200));
        let mut c = cursor(&[0xFF, 0xFF]);
        assert_eq!(decode_int(Marker::from_raw(0x11), &mut c, 8).unwrap(), Element::Int(65_535));
        let mut c = cursor(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            decode_int(Marker::from_raw(0x12), &mut c, 8).unwrap(),
            Element::Int(4_294_967_295)
        );
        let mut c = cursor(&[0xFF; 8]);
        assert_eq!(decode_int(Marker::from_raw(0x13), &mut c, 8).unwrap(), Element::Int(-1));
        let mut c = cursor(&[0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            decode_int(Marker::from_raw(0x13), &mut c, 8).unwrap(),
            Element::Int(i64::MAX)
        );
    }

    #[test]
    fn reject_sixteen_byte_int() {
        let mut c = cursor(&[0; 16]);
        let result = decode_int(Marker::from_raw(0x14), &mut c, 8);
        assert!(matches!(
            result,
            Err(DecodeError::Wire(WireError::UnsupportedWidth { field: "int", width: 16, offset: 8 }))
        ));
    }

    #[test]
    fn reals() {
        let bytes0 = 1.5f32.to_be_bytes();
        let mut c = cursor(&bytes0);
        assert_eq!(decode_real(Marker::from_raw(0x22), &mut c, 8).unwrap(), Element::Float32(1.5));
        let bytes1 = (-2.25f64).to_be_bytes();
        let mut c = cursor(&bytes1);
        assert_eq!(
            decode_real(Marker::from_raw(0x23), &mut c, 8).unwrap(),
            Element::Float64(-2.25)
        );
    }

    #[test]
    fn reject_two_byte_real() {
        let mut c = cursor(&[0, 0]);
        let result = decode_real(Marker::from_raw(0x21), &mut c, 8);
        assert!(matches!(
            result,
            Err(DecodeError::Wire(WireError::UnsupportedWidth { field: "real", width: 2, .. }))
        ));
    }

    #[test]
    fn date_only_0x33() {
        let bytes2 = 86_400.0f64.to_be_bytes();
        let mut c = cursor(&bytes2);
        let element = decode_date(Marker::from_raw(0x33), &mut c, 8).unwrap();
        assert_eq!(element, Element::Date(PlistDate::from_seconds(86_400.0)));

        let bytes3 = 0.0f64.to_be_bytes();
        let mut c = cursor(&bytes3);
        assert!(matches!(
            decode_date(Marker::from_raw(0x30), &mut c, 8),
            Err(DecodeError::UndefinedMarker { marker: 0x30, .. })
        ));
    }

    #[test]
    fn ascii_replaces_high_bytes() {
        let mut c = cursor(&[b'H', 0xE9, b'!']);
        assert_eq!(
            decode_ascii(3, &mut c).unwrap(),
            Element::AsciiString("H\u{FFFD}!".into())
        );
    }

    #[test]
    fn utf16_big_endian() {
        // "é☃" then a surrogate pair for U+1F600.
        let bytes = [0x00, 0xE9, 0x26, 0x03, 0xD8, 0x3D, 0xDE, 0x00];
        let mut c = cursor(&bytes);
        assert_eq!(
            decode_utf16(4, &mut c).unwrap(),
            Element::UnicodeString("é☃\u{1F600}".into())
        );
    }

    #[test]
    fn utf16_unpaired_surrogate() {
        let mut c = cursor(&[0xD8, 0x00, 0x00, 0x41]);
        assert_eq!(
            decode_utf16(2, &mut c).unwrap(),
            Element::UnicodeString("\u{FFFD}A".into())
        );
    }

    #[test]
    fn utf16_truncated() {
        let mut c = cursor(&[0x00, 0x41, 0x00]);
        assert!(matches!(
            decode_utf16(2, &mut c),
            Err(DecodeError::Wire(WireError::UnexpectedEof { offset: 12 }))
        ));
    }

    #[test]
    fn uid_is_unsigned() {
        let mut c = cursor(&[0xFF]);
        assert_eq!(decode_uid(Marker::from_raw(0x80), &mut c, 8).unwrap(), Element::Uid(255));
        let mut c = cursor(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            decode_uid(Marker::from_raw(0x83), &mut c, 8).unwrap(),
            Element::Uid(u32::MAX)
        );
    }

    #[test]
    fn reject_five_byte_uid() {
        let mut c = cursor(&[0; 5]);
        assert!(matches!(
            decode_uid(Marker::from_raw(0x84), &mut c, 8),
            Err(DecodeError::Wire(WireError::UnsupportedWidth { field: "uid", width: 5, .. }))
        ));
    }

    #[test]
    fn inline_and_extended_length() {
        let mut c = cursor(&[]);
        assert_eq!(read_length(Marker::from_raw(0x5E), &mut c).unwrap(), 14);
        let mut c = cursor(&[0x10, 0x0F]);
        assert_eq!(read_length(Marker::from_raw(0x5F), &mut c).unwrap(), 15);
    }
}
