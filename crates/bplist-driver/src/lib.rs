#![warn(clippy::pedantic)]

pub mod config;
pub mod driver;
pub mod error;
pub mod render_json;
pub mod render_xml;
pub mod tree;

pub use config::{DEFAULT_MAX_NODES, DriverConfig, OutputMode};
pub use driver::{DefaultDriver, PlistDriver};
pub use error::DriverError;
pub use tree::Node;
