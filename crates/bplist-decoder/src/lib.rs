#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod scanner;

mod containers;
mod primitives;

pub use config::DecoderConfig;
pub use decoder::{BplistDecoder, DecodedPlist};
pub use error::{DecodeError, ErrorKind};
pub use scanner::{ObjectTableScanner, ScanOutcome};
