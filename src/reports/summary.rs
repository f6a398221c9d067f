//! Summary and table report generators for shell output.
//!
//! Provides compact, human-readable output for terminal usage.

use super::view::ViewData;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeReport, ChangeStatus};
use crate::model::{AssetRow, Snapshot};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn status_color(status: ChangeStatus) -> &'static str {
    match status {
        ChangeStatus::Added => "green",
        ChangeStatus::Removed => "red",
        ChangeStatus::Modified => "yellow",
    }
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Toggle ANSI color
    #[must_use]
    pub const fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    #[must_use]
    pub const fn no_color(self) -> Self {
        self.colored(false)
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn label(&self, label: &str, value: impl std::fmt::Display) -> String {
        format!("{}  {value}", self.color(label, "cyan"))
    }

    fn count_line(&self, count: usize, status: ChangeStatus, noun: (&'static str, &'static str)) -> Option<String> {
        (count > 0).then(|| {
            format!(
                "  {} {} {}",
                self.color(&format!("{}{count}", status.symbol()), status_color(status)),
                plural(count, noun.0, noun.1),
                status
            )
        })
    }

    fn push_rows(&self, lines: &mut Vec<String>, rows: &[AssetRow<'_>], config: &ReportConfig) {
        let shown = config.limit(rows.len());
        for row in &rows[..shown] {
            lines.push(format!(
                "  {}  {}",
                row.path,
                self.color(
                    &format!("({} {})", row.bundle_count, plural(row.bundle_count, "bundle", "bundles")),
                    "dim"
                )
            ));
        }
        if rows.len() > shown {
            lines.push(self.color(&format!("  ... and {} more", rows.len() - shown), "dim"));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        report: &ChangeReport,
        current: &Snapshot,
        previous: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        lines.push(self.color("Build Log Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let previous_name = config.metadata.previous_path.as_deref().unwrap_or("previous");
        let current_name = config.metadata.current_path.as_deref().unwrap_or("current");
        lines.push(self.label("Logs:", format!("{previous_name} → {current_name}")));
        lines.push(self.label(
            "Size:",
            format!(
                "{} assets, {} bundles → {} assets, {} bundles",
                previous.asset_count(),
                previous.bundle_count(),
                current.asset_count(),
                current.bundle_count()
            ),
        ));
        lines.push(String::new());

        // Changes
        lines.push(self.color("Changes:", "bold"));
        let summary = report.summary();
        let counts = [
            (summary.assets_added, ChangeStatus::Added, ("asset", "assets")),
            (summary.assets_removed, ChangeStatus::Removed, ("asset", "assets")),
            (summary.bundles_added, ChangeStatus::Added, ("bundle", "bundles")),
            (summary.bundles_removed, ChangeStatus::Removed, ("bundle", "bundles")),
            (summary.bundles_modified, ChangeStatus::Modified, ("bundle", "bundles")),
        ];
        lines.extend(
            counts
                .into_iter()
                .filter_map(|(count, status, noun)| self.count_line(count, status, noun)),
        );
        if report.is_empty() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
            return Ok(lines.join("\n"));
        }

        // Changed entries
        let mut entries: Vec<String> = Vec::new();
        for path in &report.added_assets {
            entries.push(format!("  {} asset  {path}", self.color("+", "green")));
        }
        for path in &report.removed_assets {
            entries.push(format!("  {} asset  {path}", self.color("-", "red")));
        }
        for (hash, change) in &report.bundle_changes {
            let status = change.status();
            let files = change
                .files()
                .map(|f| format!(" ({} {})", f.len(), plural(f.len(), "file", "files")))
                .unwrap_or_default();
            entries.push(format!(
                "  {} bundle {hash}{}",
                self.color(&status.symbol().to_string(), status_color(status)),
                self.color(&files, "dim")
            ));
        }

        lines.push(String::new());
        let shown = config.limit(entries.len());
        let hidden = entries.len() - shown;
        lines.extend(entries.into_iter().take(shown));
        if hidden > 0 {
            lines.push(self.color(&format!("  ... and {hidden} more"), "dim"));
        }

        Ok(lines.join("\n"))
    }

    fn generate_view_report(
        &self,
        snapshot: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        match ViewData::resolve(snapshot, &config.view) {
            ViewData::Assets {
                rows,
                total_assets,
                total_bundles,
            } => {
                lines.push(self.color("Build Log Summary", "bold"));
                lines.push(self.color("─".repeat(40).as_str(), "dim"));
                if let Some(path) = &config.metadata.current_path {
                    lines.push(self.label("Log:", path));
                }
                lines.push(self.label("Assets:", total_assets));
                lines.push(self.label("Bundles:", total_bundles));
                if rows.len() != total_assets {
                    lines.push(self.label("Matches:", rows.len()));
                }
                if !rows.is_empty() {
                    lines.push(String::new());
                    self.push_rows(&mut lines, &rows, config);
                }
            }
            ViewData::Asset {
                path,
                bundles,
                packed_into,
            } => {
                lines.push(self.label("Asset:", path));
                let Some(bundles) = bundles else {
                    lines.push(self.color("  not found in this log", "dim"));
                    return Ok(lines.join("\n"));
                };

                lines.push(self.color(&format!("Bundles ({}):", bundles.len()), "bold"));
                for (hash, guids) in bundles {
                    lines.push(format!("  {hash}"));
                    for guid in guids {
                        lines.push(self.color(&format!("    {guid}"), "dim"));
                    }
                }
                if !packed_into.is_empty() {
                    lines.push(self.color(&format!("Packed into ({}):", packed_into.len()), "bold"));
                    for hash in packed_into {
                        lines.push(format!("  {hash}"));
                    }
                }
            }
            ViewData::Bundle { hash, bundle } => {
                lines.push(self.label("Bundle:", hash));
                let Some(bundle) = bundle else {
                    lines.push(self.color("  not found in this log", "dim"));
                    return Ok(lines.join("\n"));
                };

                if let Some(crc) = &bundle.crc {
                    lines.push(self.label("CRC:", crc));
                }
                lines.push(self.label(
                    "Files:",
                    format!("{} ({} bytes known)", bundle.file_count(), bundle.known_size()),
                ));
                for file in &bundle.files {
                    let size = file
                        .size
                        .as_ref()
                        .map_or_else(|| "-".to_string(), ToString::to_string);
                    lines.push(format!(
                        "  {}  {}  {}",
                        file.asset_path,
                        self.color(&file.guid, "dim"),
                        size
                    ));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter for terminal output with aligned columns
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Toggle ANSI color
    #[must_use]
    pub const fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    #[must_use]
    pub const fn no_color(self) -> Self {
        self.colored(false)
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Pad first, then color, so escape codes do not skew alignment.
    fn cell(&self, text: &str, width: usize, color: &str) -> String {
        self.color(&format!("{:<width$}", truncate(text, width)), color)
    }

    fn header(&self, columns: &[(&str, usize)]) -> Vec<String> {
        let header = columns
            .iter()
            .map(|(title, width)| self.cell(title, *width, "bold"))
            .collect::<Vec<_>>()
            .join(" ");
        let rule_width = columns.iter().map(|(_, w)| w + 1).sum::<usize>();
        vec![header, "─".repeat(rule_width)]
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

const STATUS_WIDTH: usize = 10;
const HASH_WIDTH: usize = 40;
const PATH_WIDTH: usize = 60;
const GUID_WIDTH: usize = 34;

impl ReportGenerator for TableReporter {
    fn generate_diff_report(
        &self,
        report: &ChangeReport,
        _current: &Snapshot,
        _previous: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        if !report.added_assets.is_empty() || !report.removed_assets.is_empty() {
            lines.extend(self.header(&[("STATUS", STATUS_WIDTH), ("ASSET", PATH_WIDTH)]));
            let assets = report
                .added_assets
                .iter()
                .map(|p| (ChangeStatus::Added, p))
                .chain(report.removed_assets.iter().map(|p| (ChangeStatus::Removed, p)));
            for (status, path) in assets.take(config.max_items.unwrap_or(usize::MAX)) {
                lines.push(format!(
                    "{} {}",
                    self.cell(&format!("{} {status}", status.symbol()), STATUS_WIDTH, status_color(status)),
                    path
                ));
            }
            lines.push(String::new());
        }

        if !report.bundle_changes.is_empty() {
            lines.extend(self.header(&[
                ("STATUS", STATUS_WIDTH),
                ("BUNDLE", HASH_WIDTH),
                ("FILES", 6),
            ]));
            let shown = config.limit(report.bundle_changes.len());
            for (hash, change) in report.bundle_changes.iter().take(shown) {
                let status = change.status();
                let files = change
                    .files()
                    .map_or_else(|| "-".to_string(), |f| f.len().to_string());
                lines.push(format!(
                    "{} {} {}",
                    self.cell(&format!("{} {status}", status.symbol()), STATUS_WIDTH, status_color(status)),
                    self.cell(hash, HASH_WIDTH, ""),
                    files
                ));
            }
            lines.push(String::new());
        }

        // Summary footer
        let summary = report.summary();
        lines.push(format!(
            "Total: {} changes | Assets: {} added, {} removed | Bundles: {} added, {} removed, {} modified",
            summary.total_changes,
            summary.assets_added,
            summary.assets_removed,
            summary.bundles_added,
            summary.bundles_removed,
            summary.bundles_modified
        ));

        Ok(lines.join("\n"))
    }

    fn generate_view_report(
        &self,
        snapshot: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        match ViewData::resolve(snapshot, &config.view) {
            ViewData::Assets {
                rows,
                total_assets,
                total_bundles,
            } => {
                lines.extend(self.header(&[("ASSET", PATH_WIDTH), ("BUNDLES", 7)]));
                let shown = config.limit(rows.len());
                for row in &rows[..shown] {
                    lines.push(format!(
                        "{} {:>7}",
                        self.cell(row.path, PATH_WIDTH, ""),
                        row.bundle_count
                    ));
                }
                if rows.len() > shown {
                    lines.push(self.color(&format!("... and {} more assets", rows.len() - shown), "dim"));
                }
                lines.push(String::new());
                lines.push(format!(
                    "Total: {} of {total_assets} assets | {total_bundles} bundles",
                    rows.len()
                ));
            }
            ViewData::Asset {
                path,
                bundles,
                packed_into,
            } => {
                let Some(bundles) = bundles else {
                    return Ok(format!("Asset not found: {path}"));
                };
                lines.extend(self.header(&[("BUNDLE", HASH_WIDTH), ("GUID", GUID_WIDTH)]));
                for (hash, guids) in bundles {
                    if guids.is_empty() {
                        lines.push(format!("{} -", self.cell(hash, HASH_WIDTH, "")));
                    }
                    for guid in guids {
                        lines.push(format!("{} {guid}", self.cell(hash, HASH_WIDTH, "")));
                    }
                }
                lines.push(String::new());
                lines.push(format!(
                    "Total: {} bundles | packed into {} bundles",
                    bundles.len(),
                    packed_into.len()
                ));
            }
            ViewData::Bundle { hash, bundle } => {
                let Some(bundle) = bundle else {
                    return Ok(format!("Bundle not found: {hash}"));
                };
                lines.extend(self.header(&[
                    ("ASSET PATH", PATH_WIDTH),
                    ("GUID", GUID_WIDTH),
                    ("SIZE", 12),
                ]));
                for file in &bundle.files {
                    let size = file
                        .size
                        .as_ref()
                        .map_or_else(|| "-".to_string(), ToString::to_string);
                    lines.push(format!(
                        "{} {} {size:>12}",
                        self.cell(&file.asset_path, PATH_WIDTH, ""),
                        self.cell(&file.guid, GUID_WIDTH, "dim"),
                    ));
                }
                lines.push(String::new());
                let crc = bundle
                    .crc
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string);
                lines.push(format!(
                    "Total: {} files | {} bytes known | CRC {crc}",
                    bundle.file_count(),
                    bundle.known_size()
                ));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Truncate a string to fit within `max_len` (UTF-8 safe)
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
