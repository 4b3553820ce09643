/// Errors raised while resolving a container into a native value.
///
/// None of these can occur while a table is being built: references
/// are plain integers until something dereferences them. They surface
/// only from [`ElementRef::value`](crate::ElementRef::value).
///
/// ```text
/// ┌─────────────────────┬──────────────────────────────────────────────┐
/// │ Variant             │ Cause                                        │
/// ├─────────────────────┼──────────────────────────────────────────────┤
/// │ IndexOutOfRange     │ reference points past the end of the table   │
/// │ CyclicReference     │ strict mode: index re-entered its own chain  │
/// │ DepthLimitExceeded  │ nesting deeper than ResolveConfig::max_depth │
/// └─────────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("reference to object {index} is out of range for a table of {len} objects")]
    IndexOutOfRange { index: usize, len: usize },

    /// Only reported when [`ResolveConfig::strict`](crate::ResolveConfig)
    /// is set.
    #[error("cyclic reference: object {index} contains itself")]
    CyclicReference { index: usize },

    /// Legacy mode has no cycle detection, so a cyclic graph ends here.
    #[error("resolution depth limit {limit} exceeded at object {index}")]
    DepthLimitExceeded { limit: usize, index: usize },
}
