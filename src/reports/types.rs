//! Report type definitions.

use crate::config::ViewTarget;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: table if TTY, summary otherwise
    #[default]
    Auto,
    /// Brief summary output
    Summary,
    /// Aligned table for terminal (colored)
    Table,
    /// Structured JSON output
    Json,
    /// Stand-alone HTML report
    Html,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// What a view report shows
    pub view: ViewTarget,
    /// Maximum rows per section (None for all)
    pub max_items: Option<usize>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    /// Config for a view report of the given target
    #[must_use]
    pub fn for_view(view: ViewTarget) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// Truncate a row count to `max_items`
    #[must_use]
    pub fn limit(&self, len: usize) -> usize {
        self.max_items.map_or(len, |max| len.min(max))
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Previous log path (diff)
    pub previous_path: Option<String>,
    /// Current log path (diff) or viewed log path
    pub current_path: Option<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
