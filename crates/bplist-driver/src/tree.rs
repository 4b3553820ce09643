use bplist_types::{Element, ObjectTable, PlistDate, ResolveError};
use indexmap::IndexMap;

use crate::config::DriverConfig;
use crate::error::DriverError;

/// A fully expanded document, ready for a renderer.
///
/// Unlike [`Value`](bplist_types::Value), dict values are expanded too,
/// so renderers never touch the table. Shared references are expanded
/// once per occurrence.
#[derive(Clone, Debug, PartialEq)]
pub enum Node<'t> {
    Null,
    Bool(bool),
    Int(i64),
    Float32(f32),
    Float64(f64),
    Date(PlistDate),
    Data(&'t [u8]),
    String(&'t str),
    Uid(u32),
    Array(Vec<Node<'t>>),
    Dict(IndexMap<String, Node<'t>>),
}

impl<'t> Node<'t> {
    /// Expand the element at `config.root`.
    ///
    /// Keys are resolved with the table's own configuration and
    /// rendered with `Value`'s `Display`. Duplicate keys keep the last
    /// value at the position of the first.
    ///
    /// # Errors
    ///
    /// - [`DriverError::RootOutOfRange`] if the root is not in the table.
    /// - [`DriverError::Resolve`] for dangling references, for cycles
    ///   when the table resolves strictly, and for keys that fail to
    ///   resolve.
    /// - [`DriverError::DepthLimitExceeded`] past `config.max_depth`.
    /// - [`DriverError::NodeLimitExceeded`] once more than
    ///   `config.max_nodes` nodes have been expanded.
    pub fn build(table: &'t ObjectTable, config: &DriverConfig) -> Result<Self, DriverError> {
        if config.root >= table.len() {
            return Err(DriverError::RootOutOfRange {
                root: config.root,
                len: table.len(),
            });
        }
        Walk {
            table,
            max_depth: config.max_depth,
            max_nodes: config.max_nodes,
            remaining: config.max_nodes,
            strict: table.resolve_config().strict,
            chain: Vec::new(),
        }
        .node(config.root, 0)
    }
}

struct Walk<'t> {
    table: &'t ObjectTable,
    max_depth: usize,
    max_nodes: usize,
    remaining: usize,
    strict: bool,
    chain: Vec<usize>,
}

impl<'t> Walk<'t> {
    fn node(&mut self, index: usize, depth: usize) -> Result<Node<'t>, DriverError> {
        if depth > self.max_depth {
            tracing::debug!(index, limit = self.max_depth, "render depth limit hit");
            return Err(DriverError::DepthLimitExceeded {
                limit: self.max_depth,
                index,
            });
        }
        if self.remaining == 0 {
            tracing::debug!(index, limit = self.max_nodes, "render node limit hit");
            return Err(DriverError::NodeLimitExceeded {
                limit: self.max_nodes,
                index,
            });
        }
        self.remaining -= 1;
        let table = self.table;
        let element = table.elements().get(index).ok_or(ResolveError::IndexOutOfRange {
            index,
            len: table.len(),
        })?;

        Ok(match element {
            Element::Null => Node::Null,
            Element::Bool(b) => Node::Bool(*b),
            Element::Int(i) => Node::Int(*i),
            Element::Float32(f) => Node::Float32(*f),
            Element::Float64(f) => Node::Float64(*f),
            Element::Date(d) => Node::Date(*d),
            Element::Bytes(bytes) => Node::Data(bytes),
            Element::AsciiString(s) | Element::UnicodeString(s) => Node::String(s),
            Element::Uid(uid) => Node::Uid(*uid),
            Element::Array(array) => {
                self.enter(index)?;
                let items = array
                    .refs
                    .iter()
                    .map(|&child| self.node(child, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                self.leave();
                Node::Array(items)
            }
            Element::Dict(dict) => {
                self.enter(index)?;
                let mut map = IndexMap::with_capacity(dict.len());
                for (key, value) in dict.pairs() {
                    let key_ref = table.get(key).ok_or(ResolveError::IndexOutOfRange {
                        index: key,
                        len: table.len(),
                    })?;
                    // Container keys are walked first so their expansion
                    // is charged to the node budget.
                    if key_ref.element_type().is_container() {
                        self.node(key, depth + 1)?;
                    }
                    let key = key_ref.value()?.to_string();
                    map.insert(key, self.node(value, depth + 1)?);
                }
                self.leave();
                Node::Dict(map)
            }
        })
    }

    fn enter(&mut self, index: usize) -> Result<(), DriverError> {
        if !self.strict {
            return Ok(());
        }
        if self.chain.contains(&index) {
            return Err(ResolveError::CyclicReference { index }.into());
        }
        self.chain.push(index);
        Ok(())
    }

    fn leave(&mut self) {
        if self.strict {
            self.chain.pop();
        }
    }
}
