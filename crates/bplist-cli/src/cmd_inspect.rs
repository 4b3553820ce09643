/// Implementation of `bplist inspect`.
///
/// Decodes a file and prints the trailer, then one line per element of
/// the object table. With `--index N` only that element is shown.
///
/// # Output format
///
/// ```text
/// Trailer: 4 objects, top=0, offset table at 17, offset size 1, ref size 1
/// Table:   4 elements
/// #0     array    3 items  refs=[1, 2, 3] width=1
/// #1     bool     true
/// #2     int      42
/// #3     ascii    "x"
/// ---
/// scan consumed the whole object table
/// ```
use std::fmt::Write as _;

use anyhow::{Result, bail};
use bplist_decoder::DecoderConfig;
use bplist_types::{Element, ElementRef};

use crate::InspectArgs;
use crate::input;

/// Longest string or byte preview, in characters.
const PREVIEW_CHARS: usize = 48;

/// Run the `bplist inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, or if
/// `--index` is outside the table.
pub fn run(args: &InspectArgs) -> Result<()> {
    let decoded = input::decode(&args.file, &DecoderConfig::default())?;
    let trailer = &decoded.trailer;
    let table = &decoded.table;

    println!(
        "Trailer: {} object{}, top={}, offset table at {}, offset size {}, ref size {}",
        trailer.num_objects,
        if trailer.num_objects == 1 { "" } else { "s" },
        trailer.top_object,
        trailer.offset_table_offset,
        trailer.offset_int_size,
        trailer.object_ref_size
    );
    println!(
        "Table:   {} element{}",
        table.len(),
        if table.len() == 1 { "" } else { "s" }
    );

    if let Some(index) = args.index {
        let Some(element) = table.get(index) else {
            bail!("index {index} is outside a table of {} elements", table.len());
        };
        println!("{}", element_line(element, args.show_refs));
        return Ok(());
    }

    for element in table.iter() {
        println!("{}", element_line(element, args.show_refs));
    }

    println!("---");
    match decoded.stopped_at {
        Some(offset) => println!("stop marker at offset {offset}"),
        None => println!("scan consumed the whole object table"),
    }
    if !table.is_complete() {
        println!(
            "note: trailer declares {} objects, {} decoded",
            table.declared_count(),
            table.len()
        );
    }

    Ok(())
}

// ── Element formatting helpers ────────────────────────────────────────────────

fn element_line(element: ElementRef<'_>, show_refs: bool) -> String {
    let mut line = format!(
        "#{:<5} {:<8} {}",
        element.index(),
        element.element_type().label(),
        preview(element.element())
    );
    if show_refs && let Some(width) = element.element().ref_width() {
        let refs = element
            .element()
            .references()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(line, "  refs=[{refs}] width={}", width.bytes());
    }
    line
}

/// Short human-readable value. Containers show their size only; their
/// contents are separate lines of the table.
fn preview(element: &Element) -> String {
    match element {
        Element::Null => "null".to_string(),
        Element::Bool(b) => b.to_string(),
        Element::Int(i) => i.to_string(),
        Element::Float32(f) => f.to_string(),
        Element::Float64(f) => f.to_string(),
        Element::Date(d) => d.to_string(),
        Element::Bytes(bytes) => {
            let shown = &bytes[..bytes.len().min(PREVIEW_CHARS / 2)];
            let ellipsis = if shown.len() < bytes.len() { "…" } else { "" };
            format!("{} bytes {}{ellipsis}", bytes.len(), hex::encode(shown))
        }
        Element::AsciiString(s) | Element::UnicodeString(s) => {
            let truncated: String = s.chars().take(PREVIEW_CHARS).collect();
            let ellipsis = if s.chars().count() > PREVIEW_CHARS { "…" } else { "" };
            format!("{truncated:?}{ellipsis}")
        }
        Element::Uid(uid) => format!("uid {uid}"),
        Element::Array(array) => plural(array.refs.len(), "item"),
        Element::Dict(dict) => plural(dict.len(), "entry"),
    }
}

fn plural(n: usize, noun: &str) -> String {
    match (n, noun) {
        (1, _) => format!("1 {noun}"),
        (_, "entry") => format!("{n} entries"),
        _ => format!("{n} {noun}s"),
    }
}
