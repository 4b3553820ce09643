/// Implementation of `bplist validate`.
///
/// Decodes the file, then checks every array and dict in the table one
/// level deep: each reference must land inside the table, and following
/// array items and dict keys from any container must neither loop back
/// nor nest past the depth limit. Decoding alone never looks at
/// references, so this is the step that finds dangling indices and
/// cycles. Each element is visited once, so shared references cost
/// nothing extra.
///
/// # Success output
///
/// ```text
/// ✓ Header: bplist00
/// ✓ Table: 4 elements decoded (4 declared)
/// ✓ References: 1 container checked
/// ```
///
/// # Failure output
///
/// ```text
/// ✓ Header: bplist00
/// ✓ Table: 1 element decoded (1 declared)
/// ✗ Error: element 0 (array): cyclic reference: object 0 contains itself
/// ```
use anyhow::{Result, anyhow};
use bplist_decoder::{DecodeError, DecoderConfig};
use bplist_types::{Element, ObjectTable, ResolveConfig, ResolveError};

use crate::ValidateArgs;
use crate::input;

/// Run the `bplist validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the payload is
/// malformed, or any container fails to resolve.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let config = DecoderConfig {
        resolve: if args.strict {
            ResolveConfig::strict()
        } else {
            ResolveConfig::default()
        },
    };

    let decoded = match input::decode(&args.file, &config) {
        Ok(decoded) => decoded,
        Err(e) => {
            if let Some(decode) = e.downcast_ref::<DecodeError>()
                && decode.is_format_error()
            {
                println!("✗ Error: {decode}");
            }
            return Err(e);
        }
    };

    let table = &decoded.table;
    println!("✓ Header: bplist00");
    println!(
        "✓ Table: {} element{} decoded ({} declared)",
        table.len(),
        if table.len() == 1 { "" } else { "s" },
        table.declared_count()
    );
    if let Some(offset) = decoded.stopped_at {
        println!("✓ Stop marker at offset {offset}; remaining bytes ignored");
    }

    match check_references(table) {
        Ok(containers) => {
            println!(
                "✓ References: {containers} container{} checked",
                if containers == 1 { "" } else { "s" }
            );
            Ok(())
        }
        Err((index, e)) => {
            let kind = table.get(index).map_or("?", |element| element.element_type().label());
            println!("✗ Error: element {index} ({kind}): {e}");
            Err(anyhow!("validation failed"))
        }
    }
}

/// Check every container's references. Returns the number of
/// containers, or the first failing index and its error.
fn check_references(table: &ObjectTable) -> Result<usize, (usize, ResolveError)> {
    let mut containers = 0;
    for element in table.iter().filter(|e| e.element_type().is_container()) {
        containers += 1;
        if let Some(&index) = element.element().references().iter().find(|&&r| r >= table.len()) {
            return Err((
                element.index(),
                ResolveError::IndexOutOfRange {
                    index,
                    len: table.len(),
                },
            ));
        }
    }
    check_nesting(table)?;
    Ok(containers)
}

#[derive(Clone, Copy)]
enum Mark {
    Unvisited,
    Open,
    Height(usize),
}

/// References resolution follows eagerly: array items and dict keys.
/// Dict values stay lazy handles until asked for.
fn eager_refs(element: &Element) -> &[usize] {
    match element {
        Element::Array(array) => &array.refs,
        Element::Dict(dict) => &dict.keys,
        _ => &[],
    }
}

/// Iterative depth-first pass over eager references. Finds loops
/// (reported as cycles when the table resolves strictly, as a depth
/// failure otherwise) and containers whose nesting exceeds the table's
/// depth limit. All references must already be in range.
fn check_nesting(table: &ObjectTable) -> Result<(), (usize, ResolveError)> {
    let ResolveConfig { strict, max_depth } = *table.resolve_config();
    let elements = table.elements();
    let mut marks = vec![Mark::Unvisited; elements.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..elements.len() {
        if !matches!(marks[start], Mark::Unvisited) {
            continue;
        }
        marks[start] = Mark::Open;
        stack.push((start, 0));

        while let Some(top) = stack.last_mut() {
            let (index, next) = *top;
            let children = eager_refs(&elements[index]);
            if let Some(&child) = children.get(next) {
                top.1 += 1;
                match marks[child] {
                    Mark::Unvisited => {
                        marks[child] = Mark::Open;
                        stack.push((child, 0));
                    }
                    Mark::Open if strict => {
                        return Err((child, ResolveError::CyclicReference { index: child }));
                    }
                    Mark::Open => {
                        return Err((
                            child,
                            ResolveError::DepthLimitExceeded {
                                limit: max_depth,
                                index: child,
                            },
                        ));
                    }
                    Mark::Height(_) => {}
                }
                continue;
            }

            let height = children
                .iter()
                .map(|&child| match marks[child] {
                    Mark::Height(h) => h + 1,
                    _ => 1,
                })
                .max()
                .unwrap_or(0);
            if height > max_depth {
                return Err((
                    index,
                    ResolveError::DepthLimitExceeded {
                        limit: max_depth,
                        index,
                    },
                ));
            }
            marks[index] = Mark::Height(height);
            stack.pop();
        }
    }
    Ok(())
}
