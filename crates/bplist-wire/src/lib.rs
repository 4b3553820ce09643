#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod header;
pub mod marker;
pub mod refs;

pub use cursor::ByteCursor;
pub use error::WireError;
pub use header::{HEADER_SIZE, MAGIC, TRAILER_SIZE, Trailer};
pub use marker::Marker;
pub use refs::RefWidth;
