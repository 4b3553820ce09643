#![warn(clippy::pedantic)]

pub mod config;
pub mod date;
pub mod element;
pub mod element_type;
pub mod error;
pub mod table;
pub mod value;

pub use bplist_wire::RefWidth;
pub use config::ResolveConfig;
pub use date::PlistDate;
pub use element::{ArrayRefs, DictRefs, Element};
pub use element_type::ElementType;
pub use error::ResolveError;
pub use table::{ElementRef, ObjectTable};
pub use value::Value;
