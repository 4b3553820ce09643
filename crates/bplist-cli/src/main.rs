/// bplist command-line tool: inspect, validate and convert binary
/// property lists.
///
/// # Command overview
///
/// ```text
/// bplist <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print the trailer and one line per object-table element
///   validate   Decode a file and resolve every container
///   convert    Render a file as an XML property list or JSON
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder details to stderr (RUST_LOG still applies)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// `<FILE>` is a path, or `-` to read standard input.
///
/// # Exit codes
///
/// | Code | Meaning                                       |
/// |------|-----------------------------------------------|
/// | 0    | Success                                       |
/// | 1    | Error (I/O failure, malformed plist, etc.)    |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_convert;
mod cmd_inspect;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Binary property list tool.
#[derive(Parser)]
#[command(name = "bplist", version, about = "Binary property list decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder details (trailer, stop markers, guards) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the trailer and one line per object-table element.
    Inspect(InspectArgs),
    /// Decode a file and resolve every container.
    Validate(ValidateArgs),
    /// Render a file as an XML property list or JSON.
    Convert(ConvertArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `bplist inspect`.
///
/// ```text
/// ┌─────────────┬────────────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                                 │
/// ├─────────────┼────────────────────────────────────────────────────────┤
/// │ --index N   │ Show only the element at index N                       │
/// │ --show-refs │ List raw reference indices and width for containers    │
/// └─────────────┴────────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// bplist file to inspect, or `-` for stdin.
    pub file: PathBuf,

    /// Inspect only the element at this zero-based index.
    #[arg(long)]
    pub index: Option<usize>,

    /// Show the raw reference indices of arrays and dicts.
    #[arg(long)]
    pub show_refs: bool,
}

/// Arguments for `bplist validate`.
///
/// Decodes the file, then resolves every container in the table. Exits
/// 0 when everything resolves and 1 otherwise.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// bplist file to validate, or `-` for stdin.
    pub file: PathBuf,

    /// Report cycles as errors instead of relying on the depth limit.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `bplist convert`.
///
/// ```text
/// ┌───────────────┬──────────────────────────────────────────────────────┐
/// │ Flag          │ Values / default                                     │
/// ├───────────────┼──────────────────────────────────────────────────────┤
/// │ --format      │ xml (default) | json                                 │
/// │ --root        │ element index rendered as the root (default 0)       │
/// │ --strict      │ report cycles instead of hitting the depth limit     │
/// │ --max-depth   │ deepest nesting followed (default 512)               │
/// │ --max-nodes   │ most nodes expanded (default 1000000)                │
/// │ -o / --output │ write to file instead of stdout                      │
/// └───────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// bplist file to convert, or `-` for stdin.
    pub file: PathBuf,

    /// Output format: `xml` or `json`.
    #[arg(long, default_value = "xml")]
    pub format: String,

    /// Index of the element to render as the document root.
    #[arg(long, default_value_t = 0)]
    pub root: usize,

    /// Report cycles as errors instead of relying on the depth limit.
    #[arg(long)]
    pub strict: bool,

    /// Deepest container nesting to follow.
    #[arg(long, default_value_t = bplist_types::config::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Most nodes to expand before giving up. Shared references count
    /// once per occurrence.
    #[arg(long, default_value_t = bplist_driver::DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Write rendered output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Convert(args) => cmd_convert::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG`. `--verbose` adds a `debug`
/// directive for the bplist crates.
fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::from_default_env();
    if verbose {
        for directive in ["bplist_decoder=debug", "bplist_types=debug", "bplist_driver=debug"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
