use bplist_types::Element;
use bplist_wire::ByteCursor;
use bplist_wire::marker::{Marker, class};

use crate::containers;
use crate::error::DecodeError;
use crate::primitives;

/// Result of scanning an object-table region.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────┐
/// │ ScanOutcome                                                │
/// │   elements:   Vec<Element>   ← table order, fill excluded  │
/// │   stopped_at: Option<usize>  ← offset of a stop marker     │
/// └────────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScanOutcome {
    pub elements: Vec<Element>,

    /// Absolute offset of the class-7 marker that ended the scan early,
    /// or `None` if the whole region was consumed.
    pub stopped_at: Option<usize>,
}

/// Linear walk over the object-table region.
///
/// Elements are read back to back from the first byte after the header
/// up to the offset table. The trailer's offset table is never
/// consulted: an element's table index is the order in which it was
/// read. Fill bytes are skipped without taking an index.
///
/// Per marker byte:
///
/// ```text
///   high nibble   element                      payload
///   ───────────   ──────────────────────────   ─────────────────────────────
///   0x0           null / false / true / fill   none
///   0x1           Int                          2^n bytes, signed only at 8
///   0x2           Float32 / Float64            4 or 8 bytes
///   0x3           Date (0x33 only)             8-byte float
///   0x4           Bytes                        count bytes
///   0x5           AsciiString                  count bytes
///   0x6           UnicodeString                count × 2 bytes
///   0x7           (stop)                       scan ends, no error
///   0x8           Uid                          n + 1 bytes, unsigned
///   0xA           Array                        count refs
///   0xD           Dict                         count key refs, count value refs
///   other         (undefined)                  error
/// ```
pub struct ObjectTableScanner<'a> {
    cursor: ByteCursor<'a>,
    object_count: u64,
}

impl<'a> ObjectTableScanner<'a> {
    /// `region` holds the object-table bytes, `base` is the payload
    /// offset of `region[0]`, and `object_count` is the trailer's
    /// declared count, which fixes the container reference widths.
    pub fn new(region: &'a [u8], base: usize, object_count: u64) -> Self {
        Self {
            cursor: ByteCursor::new(region, base),
            object_count,
        }
    }

    /// Scan the whole region.
    ///
    /// # Errors
    ///
    /// The first malformed element aborts the scan:
    /// - [`DecodeError::UndefinedMarker`] for classes 9, B, C, E, F, for
    ///   undefined singletons, and for date markers other than `0x33`.
    /// - [`DecodeError::Wire`] for truncated payloads, unsupported
    ///   widths, and count extensions that are not integer markers.
    pub fn scan(mut self) -> Result<ScanOutcome, DecodeError> {
        // One element takes at least one byte.
        let capacity = usize::try_from(self.object_count)
            .unwrap_or(usize::MAX)
            .min(self.cursor.remaining());
        let mut elements = Vec::with_capacity(capacity);

        while !self.cursor.is_empty() {
            let offset = self.cursor.offset();
            let marker = Marker::from_raw(self.cursor.read_u8()?);

            if marker.class() == class::STOP {
                tracing::debug!(
                    offset,
                    marker = marker.raw(),
                    decoded = elements.len(),
                    "stop marker ends object table"
                );
                return Ok(ScanOutcome {
                    elements,
                    stopped_at: Some(offset),
                });
            }

            if let Some(element) = self.next_element(marker, offset)? {
                tracing::trace!(
                    index = elements.len(),
                    offset,
                    kind = %element.element_type(),
                    "decoded element"
                );
                elements.push(element);
            }
        }

        Ok(ScanOutcome {
            elements,
            stopped_at: None,
        })
    }

    /// Decode one element whose marker has been consumed. `None` means
    /// a fill byte.
    fn next_element(&mut self, marker: Marker, offset: usize) -> Result<Option<Element>, DecodeError> {
        let cursor = &mut self.cursor;
        let element = match marker.class() {
            class::SINGLETON => return primitives::decode_singleton(marker, offset),
            class::INT => primitives::decode_int(marker, cursor, offset)?,
            class::REAL => primitives::decode_real(marker, cursor, offset)?,
            class::DATE => primitives::decode_date(marker, cursor, offset)?,
            class::DATA => {
                let count = primitives::read_length(marker, cursor)?;
                primitives::decode_bytes(count, cursor)?
            }
            class::ASCII_STRING => {
                let count = primitives::read_length(marker, cursor)?;
                primitives::decode_ascii(count, cursor)?
            }
            class::UNICODE_STRING => {
                let count = primitives::read_length(marker, cursor)?;
                primitives::decode_utf16(count, cursor)?
            }
            class::UID => primitives::decode_uid(marker, cursor, offset)?,
            class::ARRAY => {
                let count = primitives::read_length(marker, cursor)?;
                containers::decode_array(count, self.object_count, cursor)?
            }
            class::DICT => {
                let count = primitives::read_length(marker, cursor)?;
                containers::decode_dict(count, self.object_count, cursor)?
            }
            _ => {
                return Err(DecodeError::UndefinedMarker {
                    marker: marker.raw(),
                    offset,
                });
            }
        };
        Ok(Some(element))
    }
}
