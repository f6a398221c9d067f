//! Report generation for build logs and their differences.
//!
//! This module provides several output formats:
//! - JSON: Structured data for programmatic integration
//! - HTML: Stand-alone static report
//! - Summary: Compact shell-friendly output
//! - Table: Aligned tabular terminal output
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! All log-controlled data (asset paths, hashes, GUIDs) must be escaped
//! before embedding in HTML.

pub mod escape;
mod html;
mod json;
mod summary;
mod types;
mod view;

pub use html::HtmlReporter;
pub(crate) use html::STYLES;
pub use json::JsonReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::{ReportConfig, ReportFormat, ReportMetadata};
pub use view::ViewData;

use crate::diff::ChangeReport;
use crate::model::Snapshot;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a change report
    fn generate_diff_report(
        &self,
        report: &ChangeReport,
        current: &Snapshot,
        previous: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate a report for a single log (view mode)
    fn generate_view_report(
        &self,
        snapshot: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_diff_report(
        &self,
        report: &ChangeReport,
        current: &Snapshot,
        previous: &Snapshot,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let output = self.generate_diff_report(report, current, previous, config)?;
        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Reporter for `format`, colored where the format supports it.
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Reporter for `format`. `Auto` should already be resolved against the
/// output target; if not, it renders as the summary.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Table => Box::new(TableReporter::new().colored(use_color)),
        ReportFormat::Auto | ReportFormat::Summary => {
            Box::new(SummaryReporter::new().colored(use_color))
        }
    }
}
