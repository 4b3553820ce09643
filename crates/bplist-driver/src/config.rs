use bplist_types::config::DEFAULT_MAX_DEPTH;

/// Default cap on nodes expanded for one render.
pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Configuration for the plist driver.
///
/// ```text
/// ┌───────────┬─────────────────────────────────────────────────────┐
/// │ Field     │ Purpose                                             │
/// ├───────────┼─────────────────────────────────────────────────────┤
/// │ mode      │ Selects XML plist or JSON output                    │
/// │ root      │ Table index rendered as the document root           │
/// │ max_depth │ Deepest container nesting the walk will follow      │
/// │ max_nodes │ Most nodes expanded before the render is abandoned  │
/// └───────────┴─────────────────────────────────────────────────────┘
/// ```
///
/// Whether cycles are reported as such or only stopped by `max_depth`
/// follows the table's own [`ResolveConfig`](bplist_types::ResolveConfig).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub mode: OutputMode,

    /// Index of the element to render. Nothing in the decoded table
    /// marks a root, so this defaults to the first element.
    pub root: usize,

    pub max_depth: usize,

    /// Shared references expand once per occurrence, so a shallow table
    /// can describe an exponentially large document. Every expanded node,
    /// container keys included, counts against this.
    pub max_nodes: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Xml,
            root: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Output formats.
///
/// ```text
/// ┌──────┬──────────────────────────────────────────────────────────┐
/// │ Mode │ Output                                                   │
/// ├──────┼──────────────────────────────────────────────────────────┤
/// │ Xml  │ Apple XML property list, tab indented                    │
/// │ Json │ Pretty-printed JSON; dates RFC 3339, data base64         │
/// └──────┴──────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Xml,
    Json,
}
