#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: magic check, trailer parsing and region bounds.
//
// Catches bugs in:
// - Short input handling
// - Offset-table offsets near the header and trailer edges
// - Offsets that do not fit in usize
fuzz_target!(|data: &[u8]| {
    let _ = bplist_wire::header::check_magic(data);
    if let Ok(trailer) = bplist_wire::Trailer::read_from(data) {
        if let Ok(region) = trailer.object_table_region(data.len()) {
            assert!(region.start == bplist_wire::HEADER_SIZE);
            assert!(region.end + bplist_wire::TRAILER_SIZE <= data.len());
        }
    }
});
