use bplist_wire::RefWidth;

use crate::date::PlistDate;
use crate::element_type::ElementType;

/// One entry of the object table.
///
/// Scalars carry their decoded value. Containers carry only table
/// indices: the [`ObjectTable`](crate::ObjectTable) owns every element
/// and a container never owns what it references.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Null,
    Bool(bool),
    Int(i64),
    Float32(f32),
    Float64(f64),
    Date(PlistDate),
    Bytes(Vec<u8>),
    AsciiString(String),
    UnicodeString(String),
    Uid(u32),
    Array(ArrayRefs),
    Dict(DictRefs),
}

/// Object references of an array, in element order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayRefs {
    pub refs: Vec<usize>,
    /// Width the references were encoded at.
    pub width: RefWidth,
}

/// Parallel key and value references of a dict. `keys[i]` pairs with
/// `values[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictRefs {
    pub keys: Vec<usize>,
    pub values: Vec<usize>,
    pub width: RefWidth,
}

impl DictRefs {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Null => ElementType::Null,
            Self::Bool(_) => ElementType::Bool,
            Self::Int(_) => ElementType::Int,
            Self::Float32(_) => ElementType::Float32,
            Self::Float64(_) => ElementType::Float64,
            Self::Date(_) => ElementType::Date,
            Self::Bytes(_) => ElementType::Bytes,
            Self::AsciiString(_) => ElementType::AsciiString,
            Self::UnicodeString(_) => ElementType::UnicodeString,
            Self::Uid(_) => ElementType::Uid,
            Self::Array(_) => ElementType::Array,
            Self::Dict(_) => ElementType::Dict,
        }
    }

    /// Every table index this element refers to (keys before values for
    /// dicts). Empty for scalars.
    pub fn references(&self) -> Vec<usize> {
        match self {
            Self::Array(array) => array.refs.clone(),
            Self::Dict(dict) => dict.keys.iter().chain(&dict.values).copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Reference width of a container, `None` for scalars.
    pub fn ref_width(&self) -> Option<RefWidth> {
        match self {
            Self::Array(array) => Some(array.width),
            Self::Dict(dict) => Some(dict.width),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags() {
        assert_eq!(Element::Null.element_type(), ElementType::Null);
        assert_eq!(Element::Int(3).element_type(), ElementType::Int);
        assert_eq!(
            Element::UnicodeString("é".into()).element_type(),
            ElementType::UnicodeString
        );
        let dict = Element::Dict(DictRefs {
            keys: vec![],
            values: vec![],
            width: RefWidth::U8,
        });
        assert!(dict.element_type().is_container());
    }

    #[test]
    fn dict_references_list_keys_then_values() {
        let dict = Element::Dict(DictRefs {
            keys: vec![1, 2],
            values: vec![3, 4],
            width: RefWidth::U16,
        });
        assert_eq!(dict.references(), vec![1, 2, 3, 4]);
        assert_eq!(dict.ref_width(), Some(RefWidth::U16));
        assert_eq!(Element::Bool(true).references(), Vec::<usize>::new());
        assert_eq!(Element::Bool(true).ref_width(), None);
    }
}
