//! Configuration types for bundle-log operations.
//!
//! Provides structured configuration for the serve, view and diff commands.

use super::defaults::{DEFAULT_BIND_ADDRESS, DEFAULT_LOG_FILE, DEFAULT_PAGE_PATH, DEFAULT_PORT};
use crate::model::{AssetSortKey, SortDirection};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Viewer server configuration
    pub server: ServerConfig,
    /// Output configuration (format, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the server port.
    pub const fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Set the server bind address.
    pub fn bind(mut self, bind: impl Into<String>) -> Self {
        self.config.server.bind = bind.into();
        self
    }

    /// Set the primary log file.
    pub fn log_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.config.server.log_file = file.into();
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Types
// ============================================================================

/// Viewer server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind: String,
    /// TCP port
    pub port: u16,
    /// Primary build log served to the page
    pub log_file: PathBuf,
    /// Route of the viewer page
    pub page_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            page_path: DEFAULT_PAGE_PATH.to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the previous (baseline) log
    pub previous: PathBuf,
    /// Path to the current log
    pub current: PathBuf,
}

/// What a view operation prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    /// The asset table, optionally filtered and sorted
    Assets {
        search: Option<String>,
        sort: AssetSortKey,
        direction: SortDirection,
    },
    /// Bundles (and GUIDs) referenced by one asset
    Asset(String),
    /// Files packed into one bundle
    Bundle(String),
}

impl Default for ViewTarget {
    fn default() -> Self {
        Self::Assets {
            search: None,
            sort: AssetSortKey::None,
            direction: SortDirection::Asc,
        }
    }
}

/// Configuration for view operations
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Path to the build log
    pub log_path: PathBuf,
    /// What to print
    pub target: ViewTarget,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Configuration for the viewer server
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Server settings
    pub server: ServerConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl ServeConfig {
    /// Socket address string (`bind:port`)
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}
