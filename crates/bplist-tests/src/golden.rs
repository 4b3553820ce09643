//! Named fixtures committed under `tests/golden/<name>.bplist`.
//!
//! `generate_golden` writes these files; the conformance suite reads
//! them back and checks they still match what the builder produces.

use crate::PlistFixture;

/// Fixture names, in generation order.
pub const NAMES: &[&str] = &["hello", "scalars", "nested", "stop_marker"];

/// Build the payload for a golden fixture, or `None` for an unknown name.
pub fn fixture(name: &str) -> Option<Vec<u8>> {
    let payload = match name {
        "hello" => hello(),
        "scalars" => scalars(),
        "nested" => nested(),
        "stop_marker" => stop_marker(),
        _ => return None,
    };
    Some(payload)
}

/// A single ASCII string root.
fn hello() -> Vec<u8> {
    let mut f = PlistFixture::new();
    f.ascii("Hi");
    f.build()
}

/// Root array holding one of each scalar kind.
fn scalars() -> Vec<u8> {
    let mut f = PlistFixture::new();
    let root = f.reserve();
    let items = [
        f.null(),
        f.bool(false),
        f.bool(true),
        f.int(-1),
        f.int(300),
        f.real32(1.5),
        f.real64(-0.25),
        f.date(0.0),
        f.data(&[0xDE, 0xAD, 0xBE, 0xEF]),
        f.ascii("plain"),
        f.utf16("h\u{e9}llo"),
    ];
    f.set_array(root, &items);
    f.build()
}

/// `{"name": "bplist", "items": [1, 2, {"deep": true}], "uid": UID(7)}`
fn nested() -> Vec<u8> {
    let mut f = PlistFixture::new();
    let root = f.reserve();
    let name_key = f.ascii("name");
    let name = f.ascii("bplist");
    let items_key = f.ascii("items");
    let items = f.reserve();
    let one = f.int(1);
    let two = f.int(2);
    let inner = f.reserve();
    let deep_key = f.ascii("deep");
    let deep = f.bool(true);
    let uid_key = f.ascii("uid");
    let uid = f.uid(7);
    f.set_dict(inner, &[(deep_key, deep)]);
    f.set_array(items, &[one, two, inner]);
    f.set_dict(root, &[(name_key, name), (items_key, items), (uid_key, uid)]);
    f.build()
}

/// One string, then a stop marker followed by bytes that are never read.
fn stop_marker() -> Vec<u8> {
    let mut f = PlistFixture::new();
    f.ascii("kept");
    f.raw([0x70, 0xFF, 0xFF]);
    f.build()
}
