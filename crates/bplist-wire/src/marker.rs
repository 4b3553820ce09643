/// Marker byte prefixing every object-table entry.
///
/// ```text
///   7 6 5 4   3 2 1 0
///  ┌───────┬─────────┐
///  │ class │  info   │
///  └───────┴─────────┘
/// ```
///
/// The high nibble selects the type class (see [`class`]). The low
/// nibble is an inline count, a power-of-two width selector, or a
/// singleton code, depending on the class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker(u8);

impl Marker {
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    /// High nibble: the type class.
    pub fn class(self) -> u8 {
        self.0 >> 4
    }

    /// Low nibble: count, width selector or singleton code.
    pub fn info(self) -> u8 {
        self.0 & 0x0F
    }

    /// True when the inline count is [`EXTENDED_COUNT`] and a separate
    /// integer element carries the real count.
    pub fn has_extended_count(self) -> bool {
        self.info() == EXTENDED_COUNT
    }
}

/// Low nibble value that means "count follows as an integer element".
pub const EXTENDED_COUNT: u8 = 0x0F;

/// Type classes selected by the high nibble.
///
/// ```text
/// ┌──────┬───────────┬─────────────────────────────────────────┐
/// │ Hi   │ Class     │ Low nibble                              │
/// ├──────┼───────────┼─────────────────────────────────────────┤
/// │ 0x0  │ SINGLETON │ 0 null, 8 false, 9 true, F fill         │
/// │ 0x1  │ INT       │ 2^n bytes follow                        │
/// │ 0x2  │ REAL      │ 2^n bytes follow                        │
/// │ 0x3  │ DATE      │ must be 3; 8-byte float follows         │
/// │ 0x4  │ DATA      │ byte count (F = extended)               │
/// │ 0x5  │ ASCII     │ char count (F = extended)               │
/// │ 0x6  │ UNICODE   │ UTF-16 unit count (F = extended)        │
/// │ 0x7  │ STOP      │ end-of-stream sentinel                  │
/// │ 0x8  │ UID       │ n+1 bytes follow                        │
/// │ 0xA  │ ARRAY     │ ref count (F = extended)                │
/// │ 0xD  │ DICT      │ pair count (F = extended)               │
/// │ else │ undefined │                                         │
/// └──────┴───────────┴─────────────────────────────────────────┘
/// ```
pub mod class {
    pub const SINGLETON: u8 = 0x0;
    pub const INT: u8 = 0x1;
    pub const REAL: u8 = 0x2;
    pub const DATE: u8 = 0x3;
    pub const DATA: u8 = 0x4;
    pub const ASCII_STRING: u8 = 0x5;
    pub const UNICODE_STRING: u8 = 0x6;
    pub const STOP: u8 = 0x7;
    pub const UID: u8 = 0x8;
    pub const ARRAY: u8 = 0xA;
    pub const DICT: u8 = 0xD;
}

/// Low-nibble codes inside the singleton class.
pub mod singleton {
    pub const NULL: u8 = 0x0;
    pub const FALSE: u8 = 0x8;
    pub const TRUE: u8 = 0x9;
    pub const FILL: u8 = 0xF;
}

/// The only defined date marker byte.
pub const DATE: u8 = 0x33;
