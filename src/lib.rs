//! sectdupe - Section-Level Duplicate Content Detector
//!
//! A cross-platform CLI tool that segments Markdown and plain-text
//! documents at heading boundaries, normalizes each section, and groups
//! exact or near-duplicate copies, reporting one canonical location per
//! group plus all redundant locations.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod dedupe;
pub mod error;
pub mod logging;
pub mod progress;
pub mod report;

use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, Commands, OutputFormat, ScanArgs};
use crate::config::Config;
use crate::corpus::WalkerConfig;
use crate::dedupe::{DetectorConfig, DuplicateDetector};
use crate::error::ExitCode;
use crate::progress::Progress;
use crate::report::{CsvOutput, JsonOutput, Report, TextOutput};

/// Run the application with parsed CLI arguments.
///
/// Returns the exit code the process should terminate with.
///
/// # Errors
///
/// Returns an error for fatal failures: invalid regex filters, strict-mode
/// document errors, or output write failures.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Scan(args) => run_scan(args, cli.quiet),
    }
}

/// Execute the scan subcommand.
fn run_scan(args: ScanArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    let config = Config::load();

    let extensions = if args.extensions.is_empty() {
        config.extensions
    } else {
        args.extensions.iter().map(|e| e.to_lowercase()).collect()
    };

    let regex_include = compile_regexes(&args.regex_include)
        .context("Invalid --include pattern")?;
    let regex_exclude = compile_regexes(&args.regex_exclude)
        .context("Invalid --exclude pattern")?;

    let walker_config = WalkerConfig {
        follow_symlinks: args.follow_symlinks,
        skip_hidden: args.skip_hidden,
        extensions,
        ignore_patterns: args.ignore_patterns,
        regex_include,
        regex_exclude,
    };

    let fuzzy_distance = args
        .fuzzy
        .then(|| args.fuzzy_bits.unwrap_or(config.fuzzy_bits));

    let mut detector_config = DetectorConfig::default()
        .with_walker_config(walker_config)
        .with_strict(args.strict)
        .with_fuzzy_distance(fuzzy_distance);

    // Progress bars draw on stderr, so they are safe alongside JSON/CSV
    // on stdout; quiet mode suppresses them entirely.
    if !quiet {
        detector_config =
            detector_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let detector = DuplicateDetector::new(detector_config);
    let (groups, summary) = detector
        .scan(args.paths)
        .context("Scan failed")?;

    let report = Report::new(&groups, &summary);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.output {
        OutputFormat::Text => TextOutput::new(&report)
            .write_to(&mut out)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonOutput::new(&report)
            .write_to(&mut out, args.pretty)
            .context("Failed to write report")?,
        OutputFormat::Csv => CsvOutput::new(&report)
            .write_to(&mut out)
            .context("Failed to write report")?,
    }

    Ok(if !summary.scan_errors.is_empty() {
        ExitCode::PartialSuccess
    } else if report.has_duplicates() {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    })
}

/// Compile user-supplied filename patterns.
fn compile_regexes(patterns: &[String]) -> Result<Vec<regex::Regex>, regex::Error> {
    patterns.iter().map(|p| regex::Regex::new(p)).collect()
}
