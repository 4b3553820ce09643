#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: ByteCursor::read_count followed by read_refs.
//
// A hostile count must fail with an error, never allocate its claimed
// size.
fuzz_target!(|data: &[u8]| {
    let mut cursor = bplist_wire::ByteCursor::new(data, 0);
    let Ok(count) = cursor.read_count() else {
        return;
    };
    let _ = cursor.read_refs(count, bplist_wire::RefWidth::U16);
});
