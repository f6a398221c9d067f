//! Report output stage.
//!
//! Handles generating and writing diff and view reports.

use super::{auto_detect_format, should_use_color, write_output, OutputTarget, PipelineError};
use crate::config::{DiffConfig, ViewConfig};
use crate::diff::ChangeReport;
use crate::model::Snapshot;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::Result;

/// Output a diff report to the configured destination.
pub fn output_report(
    config: &DiffConfig,
    report: &ChangeReport,
    current: &Snapshot,
    previous: &Snapshot,
) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format, &output_target);

    let report_config = ReportConfig {
        metadata: ReportMetadata {
            previous_path: Some(config.paths.previous.to_string_lossy().to_string()),
            current_path: Some(config.paths.current.to_string_lossy().to_string()),
            ..ReportMetadata::new()
        },
        ..ReportConfig::default()
    };

    let use_color = should_use_color(config.output.no_color, &output_target);
    let reporter = create_reporter_with_options(effective_output, use_color);
    let output = reporter
        .generate_diff_report(report, current, previous, &report_config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    write_output(&output, &output_target, config.behavior.quiet)
}

/// Output a view report to the configured destination.
pub fn output_view(config: &ViewConfig, snapshot: &Snapshot) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format, &output_target);

    let report_config = ReportConfig {
        view: config.target.clone(),
        metadata: ReportMetadata {
            current_path: Some(config.log_path.to_string_lossy().to_string()),
            ..ReportMetadata::new()
        },
        ..ReportConfig::default()
    };

    let use_color = should_use_color(config.output.no_color, &output_target);
    let reporter = create_reporter_with_options(effective_output, use_color);
    let output = reporter
        .generate_view_report(snapshot, &report_config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    write_output(&output, &output_target, config.behavior.quiet)
}
