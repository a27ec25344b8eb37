//! Library interface for `cargo-configyml`.
//!
//! The subcommand scans Rust sources for structs deriving `ConfigYml`,
//! generates their serializators with `config_yml_codegen`, and writes one
//! pretty-printed file per class. Failures are reported per class through
//! `tracing`; the run fails at the end if any class was skipped.

pub mod cli;
pub mod error;
pub mod output;
pub mod scan;

use config_yml_codegen::{BatchReport, DiagnosticSink, OutputSink, run_batch};

use crate::cli::Args;
use crate::error::CliError;
use crate::output::{DirectoryOutput, DiscardOutput};

/// Runs one generation pass described by `args`.
///
/// # Errors
///
/// Returns [`CliError::Io`] or [`CliError::Parse`] when sources cannot be
/// read, and [`CliError::GenerationFailed`] after the batch when at least one
/// class was skipped.
pub fn run(args: &Args, diagnostics: &mut dyn DiagnosticSink) -> Result<BatchReport, CliError> {
    let sources = scan::read_sources(&args.inputs)?;
    let mut candidates = Vec::new();
    for source in &sources {
        candidates.extend(scan::scan_source(source)?);
    }

    let mut directory;
    let mut discard = DiscardOutput;
    let output: &mut dyn OutputSink = if args.is_check_only {
        &mut discard
    } else {
        directory = DirectoryOutput::create(&args.out_dir)?;
        &mut directory
    };

    let report = run_batch(&candidates, output, diagnostics);
    if report.is_success() {
        Ok(report)
    } else {
        Err(CliError::GenerationFailed {
            count: report.failed.len(),
            classes: report.failed.join(", "),
        })
    }
}
