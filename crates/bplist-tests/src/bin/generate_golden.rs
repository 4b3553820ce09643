//! Golden fixture generator for the conformance suite.
//!
//! Writes every fixture in [`bplist_tests::golden::NAMES`] to
//! `tests/golden/<name>.bplist`. Run it after changing the payload
//! builder, then re-run the conformance tests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p bplist-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File               | Contents                                       |
//! |--------------------|------------------------------------------------|
//! | hello              | A single ASCII string root                     |
//! | scalars            | Root array with one of each scalar kind        |
//! | nested             | Dict holding an array holding a dict, plus UID |
//! | stop_marker        | One string, a stop marker, ignored bytes       |

#![allow(clippy::pedantic)]

use std::path::Path;

use bplist_tests::golden;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    for name in golden::NAMES {
        let payload = golden::fixture(name).expect("every listed name has a fixture");
        write_file(&golden_dir.join(format!("{name}.bplist")), &payload);
    }

    println!("All golden fixtures written to {}", golden_dir.display());
}

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {} ({} bytes)", path.display(), data.len());
}
