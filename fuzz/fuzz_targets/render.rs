#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bplist_driver::{DefaultDriver, DriverConfig, OutputMode, PlistDriver};

#[derive(Debug, Arbitrary)]
struct Input {
    json: bool,
    root: u8,
    max_depth: u8,
    max_nodes: u16,
    payload: Vec<u8>,
}

// Fuzz target: decode, then render from an arbitrary root in either
// output mode with small depth and node limits.
fuzz_target!(|input: Input| {
    let Ok(decoded) = bplist_decoder::BplistDecoder::decode(&input.payload) else {
        return;
    };
    let config = DriverConfig {
        mode: if input.json { OutputMode::Json } else { OutputMode::Xml },
        root: usize::from(input.root),
        max_depth: usize::from(input.max_depth),
        max_nodes: usize::from(input.max_nodes),
    };
    let _ = DefaultDriver.render(&decoded.table, &config);
});
