#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full decoder entry point on arbitrary bytes.
//
// Catches bugs in:
// - Magic and trailer validation
// - Object-table region bounds
// - Marker dispatch and element payload lengths
// - Extended counts and reference lists
fuzz_target!(|data: &[u8]| {
    let _ = bplist_decoder::BplistDecoder::decode(data);
});
