/// Implementation of `bplist convert`.
///
/// Decodes a file and renders it through [`DefaultDriver`] as an Apple
/// XML property list or as JSON, on stdout or into `-o <file>`.
///
/// ```text
/// ┌────────┬──────────────────────────────────────────────────────────┐
/// │ Format │ Output                                                   │
/// ├────────┼──────────────────────────────────────────────────────────┤
/// │ xml    │ <?xml ...?><plist version="1.0">...</plist>  (default)   │
/// │ json   │ pretty JSON; dates RFC 3339, data base64, UID {"CF$UID"} │
/// └────────┴──────────────────────────────────────────────────────────┘
/// ```
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result, anyhow};
use bplist_decoder::DecoderConfig;
use bplist_driver::{DefaultDriver, DriverConfig, OutputMode, PlistDriver};
use bplist_types::ResolveConfig;

use crate::ConvertArgs;
use crate::input;

/// Run the `bplist convert` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, `--format`
/// is unrecognised, rendering fails, or the output cannot be written.
pub fn run(args: &ConvertArgs) -> Result<()> {
    let mode = parse_output_mode(&args.format)?;
    let config = DecoderConfig {
        resolve: ResolveConfig {
            strict: args.strict,
            max_depth: args.max_depth,
        },
    };
    let decoded = input::decode(&args.file, &config)?;

    let driver_config = DriverConfig {
        mode,
        root: args.root,
        max_depth: args.max_depth,
        max_nodes: args.max_nodes,
    };
    let rendered = DefaultDriver
        .render(&decoded.table, &driver_config)
        .context("failed to render")?;

    if let Some(ref path) = args.output {
        fs::write(path, &rendered).with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("cannot write to stdout")?;
    }
    Ok(())
}

/// Parse `--format`.
fn parse_output_mode(s: &str) -> Result<OutputMode> {
    match s.to_ascii_lowercase().as_str() {
        "xml" | "plist" => Ok(OutputMode::Xml),
        "json" => Ok(OutputMode::Json),
        other => Err(anyhow!("unknown format {other:?}: expected xml or json")),
    }
}
