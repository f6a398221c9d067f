//! Output destination handling.
//!
//! Resolves `auto` formats and color against where the report is going, and
//! writes the rendered report there.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

/// Where a rendered report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `None` means stdout.
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// True only for stdout attached to a terminal.
    pub fn is_terminal(&self) -> bool {
        *self == Self::Stdout && std::io::stdout().is_terminal()
    }
}

/// Resolve `auto`: aligned table for a terminal, compact summary for pipes
/// and files. Explicit formats pass through.
pub fn auto_detect_format(format: ReportFormat, target: &OutputTarget) -> ReportFormat {
    if format != ReportFormat::Auto {
        return format;
    }
    if target.is_terminal() {
        ReportFormat::Table
    } else {
        ReportFormat::Summary
    }
}

/// ANSI color is used only on a terminal, without `--no-color` or `NO_COLOR`.
pub fn should_use_color(no_color_flag: bool, target: &OutputTarget) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none() && target.is_terminal()
}

/// Write a rendered report. Missing parent directories of a file target are
/// created.
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}").context("Failed to write report to stdout")
        }
        OutputTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}
