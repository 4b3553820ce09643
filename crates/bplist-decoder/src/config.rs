use bplist_types::ResolveConfig;

/// Options for [`BplistDecoder::decode_with`](crate::BplistDecoder::decode_with).
///
/// Decoding itself has no leniency knobs: the only tolerance is the
/// stop marker. The resolve settings are handed to the resulting
/// [`ObjectTable`](bplist_types::ObjectTable) so that plain
/// `value()` calls on it use them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    pub resolve: ResolveConfig,
}

impl DecoderConfig {
    /// Decode with strict (cycle-checking) resolution.
    pub fn strict() -> Self {
        Self {
            resolve: ResolveConfig::strict(),
        }
    }
}
