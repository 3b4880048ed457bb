//! Command-line interface definitions.
//!
//! All CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, color, error format) sit above the `scan`
//! subcommand.
//!
//! # Example
//!
//! ```bash
//! # Scan a documentation tree with human-readable output (default)
//! sectdupe scan docs/
//!
//! # Scan multiple roots; the root order decides canonical copies
//! sectdupe scan handbook/ wiki/ --output json
//!
//! # Near-duplicate detection with a custom bit distance
//! sectdupe scan docs/ --fuzzy --fuzzy-bits 5
//!
//! # Verbose mode for debugging
//! sectdupe -v scan docs/
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Section-level duplicate content detector.
///
/// sectdupe segments Markdown and plain-text documents at heading
/// boundaries, normalizes each section, and reports sections that are
/// exact or near-duplicate copies of each other.
#[derive(Debug, Parser)]
#[command(name = "sectdupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report fatal errors as a JSON object on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan documents for duplicate sections
    Scan(ScanArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Files or directories to scan, in canonical-preference order
    ///
    /// The first root's copy of duplicated content becomes the canonical
    /// one; within a root, files are visited in sorted order.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format (text for humans, json/csv for scripting)
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// File extensions to treat as documents (comma separated)
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Glob patterns to ignore (can be specified multiple times)
    ///
    /// These patterns are added to any .gitignore patterns found.
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Filename regexes a document must match (can be repeated)
    #[arg(long = "include", value_name = "REGEX")]
    pub regex_include: Vec<String>,

    /// Filename regexes that exclude a document (can be repeated)
    #[arg(long = "exclude", value_name = "REGEX")]
    pub regex_exclude: Vec<String>,

    /// Follow symbolic links during scan
    ///
    /// Warning: May cause infinite loops if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Also group near-duplicate sections (SimHash distance)
    #[arg(long)]
    pub fuzzy: bool,

    /// Maximum fingerprint bit distance for --fuzzy
    ///
    /// Defaults to the configured value (3 unless changed).
    #[arg(long, value_name = "N", requires = "fuzzy")]
    pub fuzzy_bits: Option<u32>,

    /// Fail on the first unreadable or empty document
    #[arg(long)]
    pub strict: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal report
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
