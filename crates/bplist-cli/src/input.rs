/// Shared input handling for every subcommand.
///
/// A path of `-` reads standard input, buffered in full. Anything else
/// is opened as a file and decoded through the seekable two-pass path.
use std::io;
use std::path::Path;

use anyhow::{Error, Result};
use bplist_decoder::{BplistDecoder, DecodedPlist, DecoderConfig, ErrorKind};

/// Decode `path` (or stdin for `-`) with `config`.
///
/// # Errors
///
/// Returns an error naming the input: "cannot read" for I/O failures,
/// "failed to decode" for malformed payloads.
pub fn decode(path: &Path, config: &DecoderConfig) -> Result<DecodedPlist> {
    let (name, result) = if is_stdin(path) {
        tracing::debug!("reading plist from stdin");
        ("stdin".to_string(), BplistDecoder::decode_reader(io::stdin().lock(), config))
    } else {
        (path.display().to_string(), BplistDecoder::decode_file(path, config))
    };

    result.map_err(|e| {
        let action = match e.kind() {
            ErrorKind::Io => "cannot read",
            ErrorKind::Format => "failed to decode",
        };
        Error::new(e).context(format!("{action} {name}"))
    })
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
