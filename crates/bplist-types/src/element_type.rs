use std::fmt;

/// Type tag of a decoded element.
///
/// ```text
/// ┌──────────────┬────────┬──────────────────────────────────┐
/// │ Variant      │ Marker │ Native value                     │
/// ├──────────────┼────────┼──────────────────────────────────┤
/// │ Null         │ 0x00   │ -                                │
/// │ Bool         │ 0x08/9 │ bool                             │
/// │ Int          │ 0x1n   │ i64                              │
/// │ Float32      │ 0x22   │ f32                              │
/// │ Float64      │ 0x23   │ f64                              │
/// │ Date         │ 0x33   │ PlistDate                        │
/// │ Bytes        │ 0x4n   │ &[u8]                            │
/// │ AsciiString  │ 0x5n   │ &str                             │
/// │ UnicodeString│ 0x6n   │ &str                             │
/// │ Uid          │ 0x8n   │ u32                              │
/// │ Array        │ 0xAn   │ Vec<Value>                       │
/// │ Dict         │ 0xDn   │ IndexMap<String, ElementRef>     │
/// └──────────────┴────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Null,
    Bool,
    Int,
    Float32,
    Float64,
    Date,
    Bytes,
    AsciiString,
    UnicodeString,
    Uid,
    Array,
    Dict,
}

impl ElementType {
    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Dict)
    }

    pub fn is_string(self) -> bool {
        matches!(self, Self::AsciiString | Self::UnicodeString)
    }

    /// Lowercase label used by the CLI and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Date => "date",
            Self::Bytes => "bytes",
            Self::AsciiString => "ascii",
            Self::UnicodeString => "unicode",
            Self::Uid => "uid",
            Self::Array => "array",
            Self::Dict => "dict",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
