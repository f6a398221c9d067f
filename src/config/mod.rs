//! Configuration module for bundle-log.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bundle_log_tools::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .port(9000)
//!     .fail_on_change(true)
//!     .build();
//!
//! // Load from file
//! use bundle_log_tools::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.bundle-log.yaml` file in your project root or `~/.config/bundle-log/`:
//!
//! ```yaml
//! server:
//!   port: 9000
//!   log_file: Build/build_log.json
//! behavior:
//!   fail_on_change: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_BIND_ADDRESS, DEFAULT_LOG_FILE, DEFAULT_PAGE_PATH, DEFAULT_PORT};
pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    CONFIG_FILE_NAMES,
};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffPaths, OutputConfig,
    ServeConfig, ServerConfig, ViewConfig, ViewTarget,
};
pub use validation::{ConfigError, Validatable};

/// Generate the JSON Schema of the configuration file format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
