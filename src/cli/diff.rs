//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two build logs.

use crate::config::DiffConfig;
use crate::diff::ChangeReport;
use crate::pipeline::{compute_diff, exit_codes, output_report, parse_log_with_context};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let previous = parse_log_with_context(&config.paths.previous, quiet)?;
    let current = parse_log_with_context(&config.paths.current, quiet)?;

    let report = compute_diff(&current.snapshot, &previous.snapshot, quiet);
    let exit_code = determine_exit_code(&config, &report);

    output_report(&config, &report, &current.snapshot, &previous.snapshot)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on the report and config flags.
fn determine_exit_code(config: &DiffConfig, report: &ChangeReport) -> i32 {
    if config.behavior.fail_on_change && !report.is_empty() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
