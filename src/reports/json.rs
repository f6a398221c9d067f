//! JSON report generator.

use super::view::ViewData;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeReport, DiffSummary};
use crate::model::Snapshot;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Emit the bare change report without the metadata envelope
    changes_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes_only: false,
            pretty: true,
        }
    }

    /// Create a reporter that emits only the `{addedAssets, removedAssets,
    /// bundleChanges}` object consumed by the viewer page
    #[must_use]
    pub const fn changes_only() -> Self {
        Self {
            changes_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        report: &ChangeReport,
        current: &Snapshot,
        previous: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        if self.changes_only {
            return self.to_json(report);
        }

        let document = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo::current(),
                generated_at: Utc::now().to_rfc3339(),
                previous: LogInfo::new(config.metadata.previous_path.clone(), previous),
                current: LogInfo::new(config.metadata.current_path.clone(), current),
            },
            summary: report.summary(),
            changes: report,
        };
        self.to_json(&document)
    }

    fn generate_view_report(
        &self,
        snapshot: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut data = ViewData::resolve(snapshot, &config.view);
        if let ViewData::Assets { rows, .. } = &mut data {
            rows.truncate(config.limit(rows.len()));
        }

        let document = JsonViewReport {
            metadata: JsonViewMetadata {
                tool: ToolInfo::current(),
                generated_at: Utc::now().to_rfc3339(),
                log: LogInfo::new(config.metadata.current_path.clone(), snapshot),
            },
            data,
        };
        self.to_json(&document)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON report structures

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata,
    summary: DiffSummary,
    changes: &'a ChangeReport,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    previous: LogInfo,
    current: LogInfo,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

impl ToolInfo {
    fn current() -> Self {
        Self {
            name: "bundle-log".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Serialize)]
struct LogInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    asset_count: usize,
    bundle_count: usize,
}

impl LogInfo {
    fn new(file_path: Option<String>, snapshot: &Snapshot) -> Self {
        Self {
            file_path,
            asset_count: snapshot.asset_count(),
            bundle_count: snapshot.bundle_count(),
        }
    }
}

// View report structures

#[derive(Serialize)]
struct JsonViewReport<'a> {
    metadata: JsonViewMetadata,
    #[serde(flatten)]
    data: ViewData<'a>,
}

#[derive(Serialize)]
struct JsonViewMetadata {
    tool: ToolInfo,
    generated_at: String,
    log: LogInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewTarget;
    use crate::diff::diff;
    use crate::model::{Bundle, FileEntry};

    fn snapshots() -> (Snapshot, Snapshot) {
        let previous = Snapshot::builder()
            .bundle("b1", Bundle::new(None, vec![FileEntry::new("a.png", "g1")]))
            .build();
        let current = Snapshot::builder()
            .bundle("b2", Bundle::new(None, vec![FileEntry::new("a.png", "g1")]))
            .build();
        (current, previous)
    }

    #[test]
    fn test_diff_report_wraps_change_report() {
        let (current, previous) = snapshots();
        let report = diff(&current, &previous);
        let mut config = ReportConfig::default();
        config.metadata.previous_path = Some("old.json".to_string());

        let output = JsonReporter::new()
            .generate_diff_report(&report, &current, &previous, &config)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["metadata"]["tool"]["name"], "bundle-log");
        assert_eq!(json["metadata"]["previous"]["file_path"], "old.json");
        assert!(json["metadata"]["generated_at"].is_string());
        assert_eq!(json["summary"]["total_changes"], 2);
        assert_eq!(json["changes"], serde_json::to_value(&report).unwrap());
    }

    #[test]
    fn test_changes_only_is_the_bare_report() {
        let (current, previous) = snapshots();
        let report = diff(&current, &previous);

        let output = JsonReporter::changes_only()
            .pretty(false)
            .generate_diff_report(&report, &current, &previous, &ReportConfig::default())
            .unwrap();
        assert_eq!(
            output,
            r#"{"addedAssets":[],"removedAssets":[],"bundleChanges":{"b2":{"status":"added","files":[{"asset_path":"a.png","guid":"g1"}]},"b1":{"status":"removed"}}}"#
        );
    }

    #[test]
    fn test_view_report_bundle() {
        let (current, _) = snapshots();
        let config = ReportConfig::for_view(ViewTarget::Bundle("b2".to_string()));

        let output = JsonReporter::new()
            .generate_view_report(&current, &config)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["view"], "bundle");
        assert_eq!(json["hash"], "b2");
        assert_eq!(json["bundle"]["files"][0]["guid"], "g1");
        assert_eq!(json["metadata"]["log"]["bundle_count"], 1);
    }
}
