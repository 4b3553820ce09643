//! Payload builder shared by the integration tests, benches and the
//! golden fixture generator.
//!
//! There is no bplist encoder in this workspace, so fixtures are
//! assembled object by object. [`PlistFixture`] lays out a complete
//! payload: header, object table, a real offset table and the trailer.
//! Container reference widths are chosen at [`build`](PlistFixture::build)
//! time from the final object count, the same way the decoder picks them.
//!
//! ```
//! use bplist_tests::PlistFixture;
//!
//! let mut fixture = PlistFixture::new();
//! let root = fixture.reserve();
//! let items = [fixture.bool(true), fixture.int(42), fixture.ascii("x")];
//! fixture.set_array(root, &items);
//! let payload = fixture.build();
//! assert_eq!(&payload[..8], b"bplist00");
//! ```

pub mod golden;

use bplist_wire::RefWidth;
use bplist_wire::marker::{DATE, EXTENDED_COUNT, class, singleton};

/// One slot in the object table, or unindexed filler bytes.
#[derive(Clone, Debug)]
enum Entry {
    /// Fully encoded element bytes, marker included.
    Object(Vec<u8>),
    Array(Vec<usize>),
    Dict(Vec<(usize, usize)>),
    /// Placeholder from [`PlistFixture::reserve`], encoded as null if
    /// never filled.
    Reserved,
    /// Bytes that take no table index: fill, stop markers, padding.
    Raw(Vec<u8>),
}

/// Builder for raw bplist payloads.
#[derive(Clone, Debug, Default)]
pub struct PlistFixture {
    entries: Vec<Entry>,
    objects: usize,
    declared: Option<u64>,
    top: u64,
}

impl PlistFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed objects added so far.
    pub fn len(&self) -> usize {
        self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects == 0
    }

    /// Override the object count written to the trailer. The count also
    /// drives the container reference widths.
    #[must_use]
    pub fn declare(mut self, count: u64) -> Self {
        self.declared = Some(count);
        self
    }

    /// Set the trailer's top-object field.
    #[must_use]
    pub fn top(mut self, index: u64) -> Self {
        self.top = index;
        self
    }

    fn push(&mut self, entry: Entry) -> usize {
        let index = self.objects;
        self.entries.push(entry);
        self.objects += 1;
        index
    }

    /// Reserve an index to be filled later with
    /// [`set_array`](Self::set_array) or [`set_dict`](Self::set_dict),
    /// so a container can precede what it references.
    pub fn reserve(&mut self) -> usize {
        self.push(Entry::Reserved)
    }

    /// Add pre-encoded element bytes as the next object.
    pub fn object(&mut self, bytes: impl Into<Vec<u8>>) -> usize {
        self.push(Entry::Object(bytes.into()))
    }

    /// Append bytes that do not take a table index.
    pub fn raw(&mut self, bytes: impl Into<Vec<u8>>) {
        self.entries.push(Entry::Raw(bytes.into()));
    }

    pub fn null(&mut self) -> usize {
        self.object([singleton::NULL])
    }

    pub fn bool(&mut self, value: bool) -> usize {
        self.object([if value { singleton::TRUE } else { singleton::FALSE }])
    }

    /// Integer at the narrowest width that reads back as `value`.
    /// Widths below 8 bytes are unsigned, so negatives always take 8.
    pub fn int(&mut self, value: i64) -> usize {
        let exp = match u64::try_from(value) {
            Ok(v) => min_unsigned_width(v).trailing_zeros() as u8,
            Err(_) => 3,
        };
        self.int_with_width(value, exp)
    }

    /// Integer over exactly `2^exp` bytes (`exp` 0..=3), truncating
    /// `value` to that width.
    pub fn int_with_width(&mut self, value: i64, exp: u8) -> usize {
        let width = 1usize << exp;
        let bytes = value.to_be_bytes();
        let mut encoded = vec![(class::INT << 4) | exp];
        encoded.extend_from_slice(&bytes[8 - width..]);
        self.object(encoded)
    }

    pub fn real32(&mut self, value: f32) -> usize {
        let mut encoded = vec![(class::REAL << 4) | 2];
        encoded.extend_from_slice(&value.to_be_bytes());
        self.object(encoded)
    }

    pub fn real64(&mut self, value: f64) -> usize {
        let mut encoded = vec![(class::REAL << 4) | 3];
        encoded.extend_from_slice(&value.to_be_bytes());
        self.object(encoded)
    }

    /// Date as seconds since 2001-01-01T00:00:00Z.
    pub fn date(&mut self, seconds: f64) -> usize {
        let mut encoded = vec![DATE];
        encoded.extend_from_slice(&seconds.to_be_bytes());
        self.object(encoded)
    }

    pub fn data(&mut self, bytes: &[u8]) -> usize {
        let mut encoded = count_header(class::DATA, bytes.len());
        encoded.extend_from_slice(bytes);
        self.object(encoded)
    }

    /// One byte per char. Non-ASCII input is encoded as-is, which is
    /// how tests produce high bytes.
    pub fn ascii(&mut self, text: &str) -> usize {
        self.ascii_bytes(text.as_bytes())
    }

    pub fn ascii_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut encoded = count_header(class::ASCII_STRING, bytes.len());
        encoded.extend_from_slice(bytes);
        self.object(encoded)
    }

    /// UTF-16BE string; the count is in code units.
    pub fn utf16(&mut self, text: &str) -> usize {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut encoded = count_header(class::UNICODE_STRING, units.len());
        for unit in units {
            encoded.extend_from_slice(&unit.to_be_bytes());
        }
        self.object(encoded)
    }

    /// UID at the narrowest width (1, 2 or 4 bytes).
    pub fn uid(&mut self, value: u32) -> usize {
        let width: usize = if value <= 0xFF {
            1
        } else if value <= 0xFFFF {
            2
        } else {
            4
        };
        let mut encoded = vec![(class::UID << 4) | (width as u8 - 1)];
        encoded.extend_from_slice(&value.to_be_bytes()[4 - width..]);
        self.object(encoded)
    }

    pub fn array(&mut self, refs: &[usize]) -> usize {
        self.push(Entry::Array(refs.to_vec()))
    }

    pub fn dict(&mut self, pairs: &[(usize, usize)]) -> usize {
        self.push(Entry::Dict(pairs.to_vec()))
    }

    /// Fill a reserved slot with an array.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not returned by [`reserve`](Self::reserve).
    pub fn set_array(&mut self, index: usize, refs: &[usize]) {
        *self.reserved_slot(index) = Entry::Array(refs.to_vec());
    }

    /// Fill a reserved slot with a dict.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not returned by [`reserve`](Self::reserve).
    pub fn set_dict(&mut self, index: usize, pairs: &[(usize, usize)]) {
        *self.reserved_slot(index) = Entry::Dict(pairs.to_vec());
    }

    fn reserved_slot(&mut self, index: usize) -> &mut Entry {
        let slot = self
            .entries
            .iter_mut()
            .filter(|entry| !matches!(entry, Entry::Raw(_)))
            .nth(index)
            .unwrap_or_else(|| panic!("no object at index {index}"));
        assert!(matches!(slot, Entry::Reserved), "object {index} was not reserved");
        slot
    }

    /// Object count written to the trailer.
    pub fn object_count(&self) -> u64 {
        self.declared.unwrap_or(self.objects as u64)
    }

    /// Assemble the payload.
    pub fn build(&self) -> Vec<u8> {
        let object_count = self.object_count();
        let array_width = RefWidth::for_array(object_count);
        let dict_width = RefWidth::for_dict(object_count);

        let mut out = b"bplist00".to_vec();
        let mut offsets = Vec::with_capacity(self.objects);
        for entry in &self.entries {
            match entry {
                Entry::Raw(bytes) => out.extend_from_slice(bytes),
                Entry::Object(bytes) => {
                    offsets.push(out.len());
                    out.extend_from_slice(bytes);
                }
                Entry::Reserved => {
                    offsets.push(out.len());
                    out.push(singleton::NULL);
                }
                Entry::Array(refs) => {
                    offsets.push(out.len());
                    out.extend(count_header(class::ARRAY, refs.len()));
                    for &r in refs {
                        push_ref(&mut out, r, array_width);
                    }
                }
                Entry::Dict(pairs) => {
                    offsets.push(out.len());
                    out.extend(count_header(class::DICT, pairs.len()));
                    for &(key, _) in pairs {
                        push_ref(&mut out, key, dict_width);
                    }
                    for &(_, value) in pairs {
                        push_ref(&mut out, value, dict_width);
                    }
                }
            }
        }

        let offset_table_offset = out.len() as u64;
        let offset_size = min_unsigned_width(offsets.iter().copied().max().unwrap_or(0) as u64);
        for offset in &offsets {
            out.extend_from_slice(&(*offset as u64).to_be_bytes()[8 - offset_size..]);
        }

        let mut trailer = [0u8; 32];
        trailer[6] = offset_size as u8;
        trailer[7] = if object_count > 0xFF { 2 } else { 1 };
        trailer[8..16].copy_from_slice(&object_count.to_be_bytes());
        trailer[16..24].copy_from_slice(&self.top.to_be_bytes());
        trailer[24..32].copy_from_slice(&offset_table_offset.to_be_bytes());
        out.extend_from_slice(&trailer);
        out
    }
}

/// Marker byte for `type_class` with an inline count, or the extended-count
/// form (`0xF` then an integer element) for counts of 15 and up.
pub fn count_header(type_class: u8, count: usize) -> Vec<u8> {
    if count < usize::from(EXTENDED_COUNT) {
        return vec![(type_class << 4) | count as u8];
    }
    let width = min_unsigned_width(count as u64);
    let exp = width.trailing_zeros() as u8;
    let mut out = vec![(type_class << 4) | EXTENDED_COUNT, (class::INT << 4) | exp];
    out.extend_from_slice(&(count as u64).to_be_bytes()[8 - width..]);
    out
}

fn push_ref(out: &mut Vec<u8>, index: usize, width: RefWidth) {
    match width {
        RefWidth::U8 => out.push(index as u8),
        RefWidth::U16 => out.extend_from_slice(&(index as u16).to_be_bytes()),
    }
}

/// Narrowest power-of-two byte width (1, 2, 4, 8) holding `value`.
fn min_unsigned_width(value: u64) -> usize {
    if value <= 0xFF {
        1
    } else if value <= 0xFFFF {
        2
    } else if value <= 0xFFFF_FFFF {
        4
    } else {
        8
    }
}
