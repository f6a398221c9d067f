//! HTML report generator.
//!
//! Produces a stand-alone static page. Every value taken from a build log is
//! escaped before it is written.

use super::escape::{escape_html, escape_html_attr, escape_html_opt};
use super::view::ViewData;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeReport, ChangeStatus};
use crate::model::Snapshot;
use std::fmt::Write;

/// Stylesheet shared by static reports and the viewer page.
pub(crate) const STYLES: &str = r#"
        <style>
            :root {
                --bg-color: #1e1e2e;
                --text-color: #cdd6f4;
                --accent-color: #89b4fa;
                --success-color: #a6e3a1;
                --warning-color: #f9e2af;
                --error-color: #f38ba8;
                --border-color: #45475a;
                --card-bg: #313244;
            }

            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                background-color: var(--bg-color);
                color: var(--text-color);
                margin: 0;
                padding: 20px;
                line-height: 1.6;
            }

            .container { max-width: 1200px; margin: 0 auto; }
            h1, h2, h3 { color: var(--accent-color); }
            code, .mono { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 0.9em; }

            .header {
                border-bottom: 2px solid var(--border-color);
                padding-bottom: 20px;
                margin-bottom: 30px;
            }

            .summary-cards {
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
                gap: 20px;
                margin-bottom: 30px;
            }

            .card {
                background-color: var(--card-bg);
                border-radius: 8px;
                padding: 20px;
                border: 1px solid var(--border-color);
            }

            .card-title { font-size: 0.9em; color: #a6adc8; margin-bottom: 10px; }
            .card-value { font-size: 2em; font-weight: bold; }
            .card-value.added { color: var(--success-color); }
            .card-value.removed { color: var(--error-color); }
            .card-value.modified { color: var(--warning-color); }

            table {
                width: 100%;
                border-collapse: collapse;
                margin-bottom: 30px;
                background-color: var(--card-bg);
                border-radius: 8px;
                overflow: hidden;
            }

            th, td {
                padding: 10px 15px;
                text-align: left;
                border-bottom: 1px solid var(--border-color);
                vertical-align: top;
            }

            th { background-color: #45475a; font-weight: 600; }
            th.sortable { cursor: pointer; user-select: none; }
            tr:hover { background-color: #3b3d4d; }
            tr.selected { background-color: #45475a; }

            .badge {
                display: inline-block;
                padding: 2px 8px;
                border-radius: 4px;
                font-size: 0.85em;
                font-weight: 500;
            }

            .badge-added { background-color: rgba(166, 227, 161, 0.2); color: var(--success-color); }
            .badge-removed { background-color: rgba(243, 139, 168, 0.2); color: var(--error-color); }
            .badge-modified { background-color: rgba(249, 226, 175, 0.2); color: var(--warning-color); }

            .section { margin-bottom: 40px; }
            .muted { color: #a6adc8; }

            .footer {
                margin-top: 40px;
                padding-top: 20px;
                border-top: 1px solid var(--border-color);
                font-size: 0.9em;
                color: #a6adc8;
            }
        </style>
        "#;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    pub fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    /// Omit the inline stylesheet
    #[must_use]
    pub const fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    fn write_head(&self, html: &mut String, title: &str) -> std::fmt::Result {
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "    <title>{}</title>", escape_html(title))?;
        if self.include_styles {
            writeln!(html, "{STYLES}")?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<div class=\"container\">")?;

        writeln!(html, "<div class=\"header\">")?;
        writeln!(html, "    <h1>{}</h1>", escape_html(title))?;
        writeln!(
            html,
            "    <p>Generated by bundle-log v{} on {}</p>",
            env!("CARGO_PKG_VERSION"),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(html, "</div>")
    }

    fn write_foot(html: &mut String) -> std::fmt::Result {
        writeln!(html, "<div class=\"footer\">bundle-log build log report</div>")?;
        writeln!(html, "</div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_card(html: &mut String, title: &str, value: &str, class: &str) -> std::fmt::Result {
    writeln!(html, "    <div class=\"card\">")?;
    writeln!(html, "        <div class=\"card-title\">{title}</div>")?;
    writeln!(html, "        <div class=\"card-value {class}\">{value}</div>")?;
    writeln!(html, "    </div>")
}

fn badge(status: ChangeStatus) -> String {
    format!("<span class=\"badge badge-{status}\">{status}</span>")
}

impl ReportGenerator for HtmlReporter {
    fn generate_diff_report(
        &self,
        report: &ChangeReport,
        current: &Snapshot,
        previous: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = config
            .title
            .clone()
            .unwrap_or_else(|| "Build Log Diff Report".to_string());
        self.write_head(&mut html, &title)?;

        writeln!(
            html,
            "<p class=\"muted\">{} ({} assets, {} bundles) &rarr; {} ({} assets, {} bundles)</p>",
            escape_html_opt(config.metadata.previous_path.as_deref()),
            previous.asset_count(),
            previous.bundle_count(),
            escape_html_opt(config.metadata.current_path.as_deref()),
            current.asset_count(),
            current.bundle_count()
        )?;

        // Summary cards
        let summary = report.summary();
        writeln!(html, "<div class=\"summary-cards\">")?;
        write_card(&mut html, "Assets Added", &format!("+{}", summary.assets_added), "added")?;
        write_card(&mut html, "Assets Removed", &format!("-{}", summary.assets_removed), "removed")?;
        write_card(&mut html, "Bundles Added", &format!("+{}", summary.bundles_added), "added")?;
        write_card(&mut html, "Bundles Removed", &format!("-{}", summary.bundles_removed), "removed")?;
        write_card(&mut html, "Bundles Modified", &format!("~{}", summary.bundles_modified), "modified")?;
        writeln!(html, "</div>")?;

        if report.is_empty() {
            writeln!(html, "<p>No changes.</p>")?;
        }

        // Asset changes
        if !report.added_assets.is_empty() || !report.removed_assets.is_empty() {
            writeln!(html, "<div class=\"section\">")?;
            writeln!(html, "<h2>Assets</h2>")?;
            writeln!(html, "<table>")?;
            writeln!(html, "<tr><th>Status</th><th>Asset Path</th></tr>")?;
            let rows = report
                .added_assets
                .iter()
                .map(|p| (ChangeStatus::Added, p))
                .chain(report.removed_assets.iter().map(|p| (ChangeStatus::Removed, p)));
            for (status, path) in rows {
                writeln!(
                    html,
                    "<tr><td>{}</td><td class=\"mono\">{}</td></tr>",
                    badge(status),
                    escape_html(path)
                )?;
            }
            writeln!(html, "</table>")?;
            writeln!(html, "</div>")?;
        }

        // Bundle changes
        if !report.bundle_changes.is_empty() {
            writeln!(html, "<div class=\"section\">")?;
            writeln!(html, "<h2>Bundles</h2>")?;
            writeln!(html, "<table>")?;
            writeln!(html, "<tr><th>Status</th><th>Bundle</th><th>Files</th></tr>")?;
            for (hash, change) in &report.bundle_changes {
                let files = change.files().map_or_else(
                    || "<span class=\"muted\">-</span>".to_string(),
                    |files| {
                        files
                            .iter()
                            .map(|f| {
                                format!(
                                    "<div class=\"mono\" title=\"{}\">{}</div>",
                                    escape_html_attr(&f.guid),
                                    escape_html(&f.asset_path)
                                )
                            })
                            .collect::<String>()
                    },
                );
                writeln!(
                    html,
                    "<tr><td>{}</td><td class=\"mono\">{}</td><td>{files}</td></tr>",
                    badge(change.status()),
                    escape_html(hash)
                )?;
            }
            writeln!(html, "</table>")?;
            writeln!(html, "</div>")?;
        }

        Self::write_foot(&mut html)?;
        Ok(html)
    }

    fn generate_view_report(
        &self,
        snapshot: &Snapshot,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = config
            .title
            .clone()
            .unwrap_or_else(|| "Build Log Report".to_string());
        self.write_head(&mut html, &title)?;

        if let Some(path) = &config.metadata.current_path {
            writeln!(html, "<p class=\"muted\">Log: {}</p>", escape_html(path))?;
        }

        match ViewData::resolve(snapshot, &config.view) {
            ViewData::Assets {
                rows,
                total_assets,
                total_bundles,
            } => {
                writeln!(html, "<div class=\"summary-cards\">")?;
                write_card(&mut html, "Assets", &total_assets.to_string(), "")?;
                write_card(&mut html, "Bundles", &total_bundles.to_string(), "")?;
                write_card(&mut html, "Shown", &rows.len().to_string(), "")?;
                writeln!(html, "</div>")?;

                writeln!(html, "<table>")?;
                writeln!(html, "<tr><th>Asset Path</th><th>Bundles</th></tr>")?;
                for row in rows.iter().take(config.limit(rows.len())) {
                    writeln!(
                        html,
                        "<tr><td class=\"mono\">{}</td><td>{}</td></tr>",
                        escape_html(row.path),
                        row.bundle_count
                    )?;
                }
                writeln!(html, "</table>")?;
            }
            ViewData::Asset {
                path,
                bundles,
                packed_into,
            } => {
                writeln!(html, "<h2 class=\"mono\">{}</h2>", escape_html(path))?;
                match bundles {
                    None => writeln!(html, "<p>Asset not found.</p>")?,
                    Some(bundles) => {
                        writeln!(html, "<table>")?;
                        writeln!(html, "<tr><th>Bundle</th><th>GUIDs</th></tr>")?;
                        for (hash, guids) in bundles {
                            let guids: Vec<_> = guids.iter().map(|g| escape_html(g)).collect();
                            writeln!(
                                html,
                                "<tr><td class=\"mono\">{}</td><td class=\"mono\">{}</td></tr>",
                                escape_html(hash),
                                guids.join("<br>")
                            )?;
                        }
                        writeln!(html, "</table>")?;
                    }
                }
                if !packed_into.is_empty() {
                    writeln!(html, "<h3>Packed into</h3>")?;
                    writeln!(html, "<ul>")?;
                    for hash in packed_into {
                        writeln!(html, "<li class=\"mono\">{}</li>", escape_html(hash))?;
                    }
                    writeln!(html, "</ul>")?;
                }
            }
            ViewData::Bundle { hash, bundle } => {
                writeln!(html, "<h2 class=\"mono\">{}</h2>", escape_html(hash))?;
                match bundle {
                    None => writeln!(html, "<p>Bundle not found.</p>")?,
                    Some(bundle) => {
                        if let Some(crc) = &bundle.crc {
                            writeln!(html, "<p>CRC: <code>{}</code></p>", escape_html(&crc.to_string()))?;
                        }
                        writeln!(html, "<table>")?;
                        writeln!(html, "<tr><th>Asset Path</th><th>GUID</th><th>Size</th></tr>")?;
                        for file in &bundle.files {
                            let size = file
                                .size
                                .as_ref()
                                .map_or_else(|| "-".to_string(), ToString::to_string);
                            writeln!(
                                html,
                                "<tr><td class=\"mono\">{}</td><td class=\"mono\">{}</td><td>{size}</td></tr>",
                                escape_html(&file.asset_path),
                                escape_html(&file.guid)
                            )?;
                        }
                        writeln!(html, "</table>")?;
                    }
                }
            }
        }

        Self::write_foot(&mut html)?;
        Ok(html)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewTarget;
    use crate::diff::diff;
    use crate::model::{Bundle, FileEntry};

    #[test]
    fn test_diff_report_escapes_log_data() {
        let previous = Snapshot::default();
        let current = Snapshot::builder()
            .bundle(
                "<b>",
                Bundle::new(None, vec![FileEntry::new("<script>x</script>", "\"g\"")]),
            )
            .build();
        let report = diff(&current, &previous);

        let html = HtmlReporter::new()
            .generate_diff_report(&report, &current, &previous, &ReportConfig::default())
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("badge-added"));
    }

    #[test]
    fn test_view_report_asset_not_found() {
        let config = ReportConfig::for_view(ViewTarget::Asset("missing".to_string()));
        let html = HtmlReporter::new()
            .without_styles()
            .generate_view_report(&Snapshot::default(), &config)
            .unwrap();
        assert!(html.contains("Asset not found."));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_view_report_asset_table() {
        let snapshot = Snapshot::builder()
            .asset("a&b.png", Default::default())
            .build();
        let html = HtmlReporter::new()
            .generate_view_report(&snapshot, &ReportConfig::default())
            .unwrap();
        assert!(html.contains("a&amp;b.png"));
        assert!(html.contains("<style>"));
    }
}
