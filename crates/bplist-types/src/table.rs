use std::fmt;

use indexmap::IndexMap;

use crate::config::ResolveConfig;
use crate::element::Element;
use crate::element_type::ElementType;
use crate::error::ResolveError;
use crate::value::Value;

/// The decoded object table: an arena of elements addressed by index.
///
/// ```text
///   index:   0            1          2       3
///          ┌────────────┬──────────┬───────┬──────┐
///          │ Array[1,2,3]│ Bool(t) │ Int 42│ "x"  │
///          └─────┬──────┴──────────┴───────┴──────┘
///                └── refs are plain indices into this table
/// ```
///
/// The table is built once by the decoder and never mutated. Container
/// resolution reads it again on every call; nothing is cached.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTable {
    elements: Vec<Element>,
    declared_count: u64,
    resolve: ResolveConfig,
}

impl ObjectTable {
    /// Wrap decoded elements. `declared_count` is the object count the
    /// trailer announced; it may exceed `elements.len()` when the scan
    /// stopped early.
    pub fn new(elements: Vec<Element>, declared_count: u64) -> Self {
        Self {
            elements,
            declared_count,
            resolve: ResolveConfig::default(),
        }
    }

    /// Set the configuration used by [`ElementRef::value`].
    #[must_use]
    pub fn with_resolve_config(mut self, config: ResolveConfig) -> Self {
        self.resolve = config;
        self
    }

    pub fn resolve_config(&self) -> &ResolveConfig {
        &self.resolve
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn declared_count(&self) -> u64 {
        self.declared_count
    }

    /// True when the scan produced as many elements as were declared.
    pub fn is_complete(&self) -> bool {
        self.elements.len() as u64 == self.declared_count
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<ElementRef<'_>> {
        (index < self.elements.len()).then_some(ElementRef { table: self, index })
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementRef<'_>> {
        (0..self.elements.len()).map(move |index| ElementRef { table: self, index })
    }
}

/// Handle to one element of an [`ObjectTable`].
///
/// This is the surface downstream code works with: a type tag and a
/// lazily resolved value. The handle borrows the table, so the table
/// outlives every resolved view.
#[derive(Clone, Copy)]
pub struct ElementRef<'t> {
    table: &'t ObjectTable,
    index: usize,
}

impl<'t> ElementRef<'t> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn table(&self) -> &'t ObjectTable {
        self.table
    }

    pub fn element(&self) -> &'t Element {
        &self.table.elements[self.index]
    }

    pub fn element_type(&self) -> ElementType {
        self.element().element_type()
    }

    /// Resolve this element with the table's [`ResolveConfig`].
    ///
    /// # Errors
    ///
    /// - [`ResolveError::IndexOutOfRange`] if a reference points past
    ///   the end of the table.
    /// - [`ResolveError::CyclicReference`] in strict mode when a
    ///   container reaches itself.
    /// - [`ResolveError::DepthLimitExceeded`] when nesting exceeds the
    ///   configured limit (this is how a cycle ends in legacy mode).
    pub fn value(&self) -> Result<Value<'t>, ResolveError> {
        self.value_with(&self.table.resolve)
    }

    /// Resolve this element with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Same as [`value`](Self::value).
    pub fn value_with(&self, config: &ResolveConfig) -> Result<Value<'t>, ResolveError> {
        Resolver {
            table: self.table,
            config,
            chain: Vec::new(),
        }
        .resolve(self.index, 0)
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.index == other.index
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("index", &self.index)
            .field("type", &self.element_type())
            .finish()
    }
}

/// One walk over the table.
///
/// `chain` holds the containers currently being resolved, outermost
/// first. It is only maintained in strict mode.
struct Resolver<'t, 'c> {
    table: &'t ObjectTable,
    config: &'c ResolveConfig,
    chain: Vec<usize>,
}

impl<'t> Resolver<'t, '_> {
    fn resolve(&mut self, index: usize, depth: usize) -> Result<Value<'t>, ResolveError> {
        if depth > self.config.max_depth {
            tracing::debug!(index, limit = self.config.max_depth, "resolution depth limit hit");
            return Err(ResolveError::DepthLimitExceeded {
                limit: self.config.max_depth,
                index,
            });
        }

        let table = self.table;
        let element = table
            .elements
            .get(index)
            .ok_or(ResolveError::IndexOutOfRange {
                index,
                len: table.elements.len(),
            })?;

        let value = match element {
            Element::Null => Value::Null,
            Element::Bool(b) => Value::Bool(*b),
            Element::Int(i) => Value::Int(*i),
            Element::Float32(f) => Value::Float32(*f),
            Element::Float64(f) => Value::Float64(*f),
            Element::Date(d) => Value::Date(*d),
            Element::Bytes(bytes) => Value::Bytes(bytes),
            Element::AsciiString(s) | Element::UnicodeString(s) => Value::String(s),
            Element::Uid(uid) => Value::Uid(*uid),
            Element::Array(array) => {
                self.enter(index)?;
                let mut items = Vec::with_capacity(array.refs.len());
                for &child in &array.refs {
                    items.push(self.resolve(child, depth + 1)?);
                }
                self.leave();
                Value::Array(items)
            }
            Element::Dict(dict) => {
                self.enter(index)?;
                let mut map = IndexMap::with_capacity(dict.len());
                for (key, value) in dict.pairs() {
                    let key = self.resolve(key, depth + 1)?.to_string();
                    let value = table.get(value).ok_or(ResolveError::IndexOutOfRange {
                        index: value,
                        len: table.elements.len(),
                    })?;
                    map.insert(key, value);
                }
                self.leave();
                Value::Dict(map)
            }
        };
        Ok(value)
    }

    fn enter(&mut self, index: usize) -> Result<(), ResolveError> {
        if !self.config.strict {
            return Ok(());
        }
        if self.chain.contains(&index) {
            tracing::debug!(index, chain = ?self.chain, "cyclic reference");
            return Err(ResolveError::CyclicReference { index });
        }
        self.chain.push(index);
        Ok(())
    }

    fn leave(&mut self) {
        if self.config.strict {
            self.chain.pop();
        }
    }
}
