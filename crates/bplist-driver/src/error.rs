use bplist_types::ResolveError;

/// Errors that can occur while rendering a decoded table.
///
/// ```text
/// ┌────────────────────┬────────────────────────────────────────────────┐
/// │ Variant            │ Cause                                          │
/// ├────────────────────┼────────────────────────────────────────────────┤
/// │ RootOutOfRange     │ Requested root index is not in the table       │
/// │ Resolve            │ Dangling reference, cycle (strict), key failed │
/// │ DepthLimitExceeded │ Nesting deeper than `DriverConfig::max_depth`  │
/// │ NodeLimitExceeded  │ More nodes than `DriverConfig::max_nodes`      │
/// │ Json               │ serde_json failed to serialize the document    │
/// └────────────────────┴────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("root index {root} is outside a table of {len} elements")]
    RootOutOfRange { root: usize, len: usize },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("nesting exceeds depth limit of {limit} at element {index}")]
    DepthLimitExceeded { limit: usize, index: usize },

    #[error("expansion exceeds node limit of {limit} at element {index}")]
    NodeLimitExceeded { limit: usize, index: usize },

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
