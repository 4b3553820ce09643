#![no_main]

use bplist_driver::{DriverConfig, Node};
use libfuzzer_sys::fuzz_target;

// Fuzz target: ObjectTableScanner over a raw region, no framing.
//
// The first byte picks the declared object count so both reference
// widths get exercised. If the scan succeeds, scalars are resolved
// directly and every container is expanded by the driver walk in
// strict mode. Shared references expand once per occurrence, so the
// walk's node budget is what bounds the work, not the cycle check.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, region)) = data.split_first() else {
        return;
    };
    let object_count = u64::from(selector) * 4;
    let Ok(outcome) = bplist_decoder::ObjectTableScanner::new(region, 8, object_count).scan() else {
        return;
    };
    let table = bplist_types::ObjectTable::new(outcome.elements, object_count)
        .with_resolve_config(bplist_types::ResolveConfig {
            strict: true,
            max_depth: 64,
        });
    for element in table.iter() {
        if element.element_type().is_container() {
            let config = DriverConfig {
                root: element.index(),
                max_depth: 64,
                max_nodes: 4096,
                ..DriverConfig::default()
            };
            let _ = Node::build(&table, &config);
        } else {
            let _ = element.value();
        }
    }
});
