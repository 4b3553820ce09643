/// Default nesting limit for container resolution.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// How [`ElementRef::value`](crate::ElementRef::value) walks the table.
///
/// ```text
/// ┌───────────┬──────────────────────────────────────────────────────┐
/// │ Field     │ Purpose                                              │
/// ├───────────┼──────────────────────────────────────────────────────┤
/// │ strict    │ track the resolution chain and report cycles         │
/// │ max_depth │ nesting limit; the only guard in legacy mode         │
/// └───────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// Legacy mode (the default) follows references blindly, so a cyclic
/// container keeps descending until `max_depth` stops it with
/// [`ResolveError::DepthLimitExceeded`](crate::ResolveError). Strict
/// mode stops at the first repeated index with
/// [`ResolveError::CyclicReference`](crate::ResolveError). Shared
/// references that do not form a cycle resolve in both modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveConfig {
    pub strict: bool,
    pub max_depth: usize,
}

impl ResolveConfig {
    /// Strict resolution with the default depth limit.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
