/// Largest declared object count for which array references are 1 byte.
pub const ARRAY_NARROW_MAX_OBJECTS: u64 = 255;

/// Largest declared object count for which dict references are 1 byte.
///
/// One more than [`ARRAY_NARROW_MAX_OBJECTS`]. Both thresholds match
/// what deployed writers were observed to produce; they are kept apart
/// until captured files show otherwise.
pub const DICT_NARROW_MAX_OBJECTS: u64 = 256;

/// Byte width of an object reference inside an array or dict entry.
///
/// The width is a property of the whole payload (derived from the
/// declared object count), never of an individual container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefWidth {
    U8,
    U16,
}

impl RefWidth {
    /// Reference width used by arrays in a payload declaring
    /// `object_count` objects.
    pub fn for_array(object_count: u64) -> Self {
        if object_count > ARRAY_NARROW_MAX_OBJECTS {
            Self::U16
        } else {
            Self::U8
        }
    }

    /// Reference width used by dicts in a payload declaring
    /// `object_count` objects.
    pub fn for_dict(object_count: u64) -> Self {
        if object_count > DICT_NARROW_MAX_OBJECTS {
            Self::U16
        } else {
            Self::U8
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_threshold() {
        assert_eq!(RefWidth::for_array(0), RefWidth::U8);
        assert_eq!(RefWidth::for_array(255), RefWidth::U8);
        assert_eq!(RefWidth::for_array(256), RefWidth::U16);
        assert_eq!(RefWidth::for_array(257), RefWidth::U16);
    }

    #[test]
    fn dict_threshold_is_one_higher() {
        assert_eq!(RefWidth::for_dict(255), RefWidth::U8);
        assert_eq!(RefWidth::for_dict(256), RefWidth::U8);
        assert_eq!(RefWidth::for_dict(257), RefWidth::U16);
    }

    #[test]
    fn widths_in_bytes() {
        assert_eq!(RefWidth::U8.bytes(), 1);
        assert_eq!(RefWidth::U16.bytes(), 2);
    }
}
