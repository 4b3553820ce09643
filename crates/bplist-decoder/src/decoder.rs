use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use bplist_types::{ElementRef, ObjectTable};
use bplist_wire::header::check_magic;
use bplist_wire::{HEADER_SIZE, TRAILER_SIZE, Trailer, WireError};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::scanner::{ObjectTableScanner, ScanOutcome};

/// The result of decoding a bplist payload.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │ DecodedPlist                                                │
/// │   trailer:    Trailer        ← counts and offsets as read   │
/// │   table:      ObjectTable    ← elements in scan order       │
/// │   stopped_at: Option<usize>  ← offset of a stop marker      │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// There is no root accessor: callers pick the element they treat as
/// the root. The trailer's `top_object` is kept for diagnostics only.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPlist {
    pub trailer: Trailer,
    pub table: ObjectTable,

    /// Set when a class-7 marker ended the scan before the region was
    /// exhausted. Everything decoded before it is in `table`.
    pub stopped_at: Option<usize>,
}

impl DecodedPlist {
    pub fn get(&self, index: usize) -> Option<ElementRef<'_>> {
        self.table.get(index)
    }

    pub fn stopped_early(&self) -> bool {
        self.stopped_at.is_some()
    }
}

/// Synchronous bplist decoder.
///
/// Decoding is one forward pass:
///
///   1. **Header**: the first 8 bytes must be `bplist00`.
///   2. **Trailer**: the last 32 bytes give the declared object count
///      and the offset at which the offset table starts. That offset
///      closes the object-table region `8..offset_table_offset`.
///   3. **Scan**: the region is read element by element; physical
///      order is table order. A stop marker (class 7) ends the scan
///      without error.
///
/// The offset table itself is never read, so this assumes a writer
/// that emits objects in index order with no gaps. References are not
/// checked here; they are checked when a container is resolved.
///
/// # Example
///
/// ```rust
/// use bplist_decoder::BplistDecoder;
/// use bplist_types::{ElementType, Value};
///
/// let mut payload = b"bplist00".to_vec();
/// payload.extend_from_slice(&[0x52, b'H', b'i']); // "Hi"
/// payload.push(0x08); // offset table
/// let mut trailer = [0u8; 32];
/// trailer[6] = 1;
/// trailer[7] = 1;
/// trailer[15] = 1; // one object
/// trailer[31] = 11; // offset table starts at byte 11
/// payload.extend_from_slice(&trailer);
///
/// let decoded = BplistDecoder::decode(&payload).unwrap();
/// let first = decoded.table.get(0).unwrap();
/// assert_eq!(first.element_type(), ElementType::AsciiString);
/// assert_eq!(first.value().unwrap(), Value::String("Hi"));
/// ```
pub struct BplistDecoder;

impl BplistDecoder {
    /// Decode a complete payload held in memory, resolving with the
    /// default (legacy) configuration.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidHeader`] if the magic is missing or wrong.
    /// - [`DecodeError::InvalidTrailer`] if the input cannot hold a
    ///   trailer or the trailer's region is out of bounds.
    /// - [`DecodeError::UndefinedMarker`] and [`DecodeError::Wire`] for
    ///   malformed elements.
    pub fn decode(payload: &[u8]) -> Result<DecodedPlist, DecodeError> {
        Self::decode_with(payload, &DecoderConfig::default())
    }

    /// Decode with an explicit configuration. The resulting table
    /// carries `config.resolve`, so plain
    /// [`ElementRef::value`] uses it.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_with(payload: &[u8], config: &DecoderConfig) -> Result<DecodedPlist, DecodeError> {
        check_magic(payload).map_err(DecodeError::InvalidHeader)?;
        let trailer = Trailer::read_from(payload).map_err(DecodeError::InvalidTrailer)?;
        let region = trailer
            .object_table_region(payload.len())
            .map_err(DecodeError::InvalidTrailer)?;
        trace_trailer(&trailer, payload.len());

        Self::scan(trailer, &payload[region], config)
    }

    /// Decode from a rewindable source in two passes: the first seeks
    /// to the end to measure the length, the second reads the header,
    /// the trailer and then the object-table region. Only the region
    /// is buffered.
    ///
    /// # Errors
    ///
    /// Everything [`decode`](Self::decode) reports, plus
    /// [`DecodeError::Io`] when a read or seek fails.
    pub fn decode_seekable<R: Read + Seek>(
        reader: &mut R,
        config: &DecoderConfig,
    ) -> Result<DecodedPlist, DecodeError> {
        // Pass 1: measure.
        let len = reader.seek(SeekFrom::End(0))?;
        let len = usize::try_from(len)
            .map_err(|_| std::io::Error::other("source is larger than the address space"))?;

        // Pass 2: header, trailer, region.
        reader.rewind()?;
        let mut header = vec![0u8; len.min(HEADER_SIZE)];
        reader.read_exact(&mut header)?;
        check_magic(&header).map_err(DecodeError::InvalidHeader)?;

        if len < HEADER_SIZE + TRAILER_SIZE {
            return Err(DecodeError::InvalidTrailer(WireError::TooShort { len }));
        }
        let mut raw = [0u8; TRAILER_SIZE];
        reader.seek(SeekFrom::Start((len - TRAILER_SIZE) as u64))?;
        reader.read_exact(&mut raw)?;
        let trailer = Trailer::from_bytes(&raw);
        let region = trailer
            .object_table_region(len)
            .map_err(DecodeError::InvalidTrailer)?;
        trace_trailer(&trailer, len);

        let mut body = vec![0u8; region.len()];
        reader.seek(SeekFrom::Start(region.start as u64))?;
        reader.read_exact(&mut body)?;

        Self::scan(trailer, &body, config)
    }

    /// Decode from a source that cannot seek. The whole input is
    /// buffered once and decoded as a slice.
    ///
    /// # Errors
    ///
    /// Same as [`decode_seekable`](Self::decode_seekable).
    pub fn decode_reader<R: Read>(mut reader: R, config: &DecoderConfig) -> Result<DecodedPlist, DecodeError> {
        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;
        Self::decode_with(&payload, config)
    }

    /// Open `path` and decode it as a seekable source.
    ///
    /// # Errors
    ///
    /// Same as [`decode_seekable`](Self::decode_seekable).
    pub fn decode_file(path: impl AsRef<Path>, config: &DecoderConfig) -> Result<DecodedPlist, DecodeError> {
        let mut file = File::open(path)?;
        Self::decode_seekable(&mut file, config)
    }

    fn scan(trailer: Trailer, region: &[u8], config: &DecoderConfig) -> Result<DecodedPlist, DecodeError> {
        let ScanOutcome {
            elements,
            stopped_at,
        } = ObjectTableScanner::new(region, HEADER_SIZE, trailer.num_objects).scan()?;

        let table = ObjectTable::new(elements, trailer.num_objects).with_resolve_config(config.resolve);
        tracing::debug!(
            elements = table.len(),
            declared = trailer.num_objects,
            stopped_early = stopped_at.is_some(),
            "decoded object table"
        );

        Ok(DecodedPlist {
            trailer,
            table,
            stopped_at,
        })
    }
}

fn trace_trailer(trailer: &Trailer, len: usize) {
    tracing::debug!(
        len,
        num_objects = trailer.num_objects,
        top_object = trailer.top_object,
        offset_table_offset = trailer.offset_table_offset,
        "read trailer"
    );
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Write};

    use bplist_types::{ElementType, ResolveConfig, ResolveError, Value};

    use super::*;
    use crate::error::ErrorKind;

    /// Header, `objects`, a one-byte-per-object offset table, trailer.
    fn payload(objects: &[u8], num_objects: u64) -> Vec<u8> {
        let mut out = b"bplist00".to_vec();
        out.extend_from_slice(objects);
        let offset_table_offset = out.len() as u64;
        out.extend(std::iter::repeat_n(0u8, usize::try_from(num_objects).unwrap()));
        let mut trailer = [0u8; TRAILER_SIZE];
        trailer[6] = 1;
        trailer[7] = 1;
        trailer[8..16].copy_from_slice(&num_objects.to_be_bytes());
        trailer[24..32].copy_from_slice(&offset_table_offset.to_be_bytes());
        out.extend_from_slice(&trailer);
        out
    }

    #[test]
    fn ascii_hi() {
        let decoded = BplistDecoder::decode(&payload(&[0x52, b'H', b'i'], 1)).unwrap();
        assert_eq!(decoded.table.len(), 1);
        let first = decoded.get(0).unwrap();
        assert_eq!(first.element_type(), ElementType::AsciiString);
        assert_eq!(first.value().unwrap(), Value::String("Hi"));
        assert!(!decoded.stopped_early());
    }

    #[test]
    fn array_of_three() {
        let objects = [0xA3, 1, 2, 3, 0x09, 0x10, 42, 0x51, b'x'];
        let decoded = BplistDecoder::decode(&payload(&objects, 4)).unwrap();
        assert_eq!(decoded.table.len(), 4);
        let value = decoded.get(0).unwrap().value().unwrap();
        assert_eq!(
            value,
            Value::Array(vec![Value::Bool(true), Value::Int(42), Value::String("x")])
        );
    }

    #[test]
    fn stop_marker_returns_partial_table() {
        let decoded = BplistDecoder::decode(&payload(&[0x09, 0x08, 0x7A, 0x09], 4)).unwrap();
        assert_eq!(decoded.table.len(), 2);
        assert_eq!(decoded.stopped_at, Some(10));
        assert!(!decoded.table.is_complete());
    }

    #[test]
    fn bad_magic() {
        let mut bytes = payload(&[0x09], 1);
        bytes[7] = b'1';
        let err = BplistDecoder::decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidHeader(WireError::InvalidMagic { .. })));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn truncated_header() {
        let err = BplistDecoder::decode(b"bpli").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidHeader(WireError::UnexpectedEof { offset: 4 })));
    }

    #[test]
    fn too_short_for_trailer() {
        let err = BplistDecoder::decode(b"bplist00\x09").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTrailer(WireError::TooShort { len: 9 })));
    }

    #[test]
    fn region_past_trailer() {
        let mut bytes = payload(&[0x09], 1);
        let len = bytes.len();
        bytes[len - 1] = 0xF0;
        let err = BplistDecoder::decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTrailer(WireError::InvalidRegion { .. })));
    }

    #[test]
    fn self_reference_decodes_then_fails_to_resolve() {
        let decoded = BplistDecoder::decode(&payload(&[0xA1, 0], 1)).unwrap();
        assert_eq!(decoded.table.len(), 1);
        let err = decoded.get(0).unwrap().value().unwrap_err();
        assert!(matches!(err, ResolveError::DepthLimitExceeded { .. }));
    }

    #[test]
    fn strict_config_is_carried_by_table() {
        let bytes = payload(&[0xA1, 0], 1);
        let decoded = BplistDecoder::decode_with(&bytes, &DecoderConfig::strict()).unwrap();
        assert_eq!(decoded.table.resolve_config(), &ResolveConfig::strict());
        let err = decoded.get(0).unwrap().value().unwrap_err();
        assert_eq!(err, ResolveError::CyclicReference { index: 0 });
    }

    #[test]
    fn seekable_matches_slice() {
        let bytes = payload(&[0xA2, 1, 2, 0x5F, 0x10, 0x0F, b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', b'o', 0x33, 0, 0, 0, 0, 0, 0, 0, 0], 3);
        let from_slice = BplistDecoder::decode(&bytes).unwrap();
        let from_seek = BplistDecoder::decode_seekable(&mut Cursor::new(&bytes), &DecoderConfig::default()).unwrap();
        assert_eq!(from_slice, from_seek);
        assert_eq!(from_seek.table.len(), 3);
    }

    #[test]
    fn seekable_bad_magic() {
        let mut bytes = payload(&[0x09], 1);
        bytes[0] = b'x';
        let err = BplistDecoder::decode_seekable(&mut Cursor::new(bytes), &DecoderConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidHeader(WireError::InvalidMagic { .. })));
    }

    #[test]
    fn seekable_too_short() {
        let err = BplistDecoder::decode_seekable(&mut Cursor::new(b"bplist00"), &DecoderConfig::default())
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTrailer(WireError::TooShort { len: 8 })));
    }

    struct Unseekable;

    impl Read for Unseekable {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }
    }

    impl Seek for Unseekable {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "cannot seek"))
        }
    }

    #[test]
    fn seek_failure_is_io() {
        let err = BplistDecoder::decode_seekable(&mut Unseekable, &DecoderConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn reader_is_buffered() {
        let bytes = payload(&[0x52, b'H', b'i'], 1);
        let decoded = BplistDecoder::decode_reader(bytes.as_slice(), &DecoderConfig::default()).unwrap();
        assert_eq!(decoded.get(0).unwrap().value().unwrap(), Value::String("Hi"));
    }

    #[test]
    fn decode_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&payload(&[0x10, 0xFF], 1)).unwrap();
        file.flush().unwrap();

        let decoded = BplistDecoder::decode_file(file.path(), &DecoderConfig::default()).unwrap();
        assert_eq!(decoded.get(0).unwrap().value().unwrap(), Value::Int(255));
    }

    #[test]
    fn missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = BplistDecoder::decode_file(dir.path().join("absent.plist"), &DecoderConfig::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
