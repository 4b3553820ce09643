use bplist_types::{ArrayRefs, DictRefs, Element};
use bplist_wire::{ByteCursor, RefWidth};

use crate::error::DecodeError;

/// Read `count` references at the payload's array width.
pub(crate) fn decode_array(count: usize, object_count: u64, cursor: &mut ByteCursor<'_>) -> Result<Element, DecodeError> {
    let width = RefWidth::for_array(object_count);
    let refs = cursor.read_refs(count, width)?;
    Ok(Element::Array(ArrayRefs { refs, width }))
}

/// Read `count` key references followed by `count` value references.
pub(crate) fn decode_dict(count: usize, object_count: u64, cursor: &mut ByteCursor<'_>) -> Result<Element, DecodeError> {
    let width = RefWidth::for_dict(object_count);
    let keys = cursor.read_refs(count, width)?;
    let values = cursor.read_refs(count, width)?;
    Ok(Element::Dict(DictRefs { keys, values, width }))
}
