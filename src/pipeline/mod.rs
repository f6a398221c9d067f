//! Pipeline orchestration for build log operations.
//!
//! This module provides shared orchestration logic for parse → diff → report
//! workflows, reducing duplication across CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::compute_diff;
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::{load_log, parse_log_with_context, ParsedLog};
pub use report_stage::{output_report, output_view};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a log file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: crate::error::BundleLogError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or no --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
