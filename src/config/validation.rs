//! Configuration validation for bundle-log.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, OutputConfig, ServerConfig, ViewConfig};
use std::net::IpAddr;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.server.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push(ConfigError {
                field: "server.port".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        if self.bind.parse::<IpAddr>().is_err() {
            errors.push(ConfigError {
                field: "server.bind".to_string(),
                message: format!("Invalid bind address '{}'", self.bind),
            });
        }

        if self.log_file.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "server.log_file".to_string(),
                message: "Log file path cannot be empty".to_string(),
            });
        }

        if !self.page_path.starts_with('/') {
            errors.push(ConfigError {
                field: "server.page_path".to_string(),
                message: format!("Page path must start with '/', got '{}'", self.page_path),
            });
        } else if self.page_path.starts_with("/api/") || self.page_path == "/build_log.json" {
            errors.push(ConfigError {
                field: "server.page_path".to_string(),
                message: format!("Page path '{}' collides with a data route", self.page_path),
            });
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Boolean flags only
        Vec::new()
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.paths.previous.exists() {
            errors.push(ConfigError {
                field: "paths.previous".to_string(),
                message: format!("File not found: {}", self.paths.previous.display()),
            });
        }
        if !self.paths.current.exists() {
            errors.push(ConfigError {
                field: "paths.current".to_string(),
                message: format!("File not found: {}", self.paths.current.display()),
            });
        }

        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ViewConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.log_path.exists() {
            errors.push(ConfigError {
                field: "log_path".to_string(),
                message: format!("File not found: {}", self.log_path.display()),
            });
        }
        errors.extend(self.output.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiffPaths, ViewTarget};
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = ServerConfig::default();
        config.port = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "server.port");
    }

    #[test]
    fn test_page_path_rules() {
        let mut config = ServerConfig::default();
        config.page_path = "viewer.html".to_string();
        assert_eq!(config.validate()[0].field, "server.page_path");

        config.page_path = "/api/viewer".to_string();
        assert!(!config.is_valid());

        config.page_path = "/index.html".to_string();
        assert!(config.is_valid());
    }

    #[test]
    fn test_bad_bind_and_empty_log_file() {
        let mut config = ServerConfig::default();
        config.bind = "not-an-ip".to_string();
        config.log_file = PathBuf::new();
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["server.bind", "server.log_file"]);
    }

    #[test]
    fn test_diff_config_missing_files() {
        let config = DiffConfig {
            paths: DiffPaths {
                previous: PathBuf::from("/nonexistent/previous.json"),
                current: PathBuf::from("/nonexistent/current.json"),
            },
            output: OutputConfig::default(),
            behavior: BehaviorConfig::default(),
        };
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_view_config_missing_file() {
        let config = ViewConfig {
            log_path: PathBuf::from("/nonexistent/build_log.json"),
            target: ViewTarget::default(),
            output: OutputConfig::default(),
            behavior: BehaviorConfig::default(),
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("log_path: File not found"));
    }
}
