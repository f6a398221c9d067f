//! Unified error types for bundle-log-tools.
//!
//! This module provides the library error hierarchy, with context chaining
//! for debugging and user-facing messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bundle-log-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BundleLogError {
    /// Errors while loading a build log
    #[error("Failed to load build log: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Log file missing: {0}")]
    MissingLog(String),

    #[error("Log file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for bundle-log-tools operations
pub type Result<T> = std::result::Result<T, BundleLogError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl BundleLogError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a missing log file
    pub fn missing_log(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::parse(
            "primary log not found",
            ParseErrorKind::MissingLog(path.display().to_string()),
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for BundleLogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for BundleLogError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<crate::parsers::ParseError> for BundleLogError {
    fn from(err: crate::parsers::ParseError) -> Self {
        use crate::parsers::ParseError;
        match err {
            ParseError::JsonError(msg) => {
                Self::parse("reading log", ParseErrorKind::InvalidJson(msg))
            }
            ParseError::TooLarge { .. } => {
                Self::parse("reading log", ParseErrorKind::TooLarge(err.to_string()))
            }
            ParseError::IoError(msg) => Self::Io {
                path: None,
                message: msg.clone(),
                source: std::io::Error::other(msg),
            },
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the existing context, creating a chain
/// that shows the path through the code.
///
/// # Example
///
/// ```ignore
/// use bundle_log_tools::error::ErrorContext;
///
/// fn load_comparison(path: &Path) -> Result<Snapshot> {
///     let content = std::fs::read_to_string(path)
///         .context("reading comparison log")?;
///
///     parse_log_str(&content)
///         .with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<BundleLogError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().wrapped(&context.into()))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| e.into().wrapped(&f().into()))
    }
}

impl BundleLogError {
    /// Prefix the message or context carried by this error with `outer`.
    fn wrapped(mut self, outer: &str) -> Self {
        let slot = match &mut self {
            Self::Parse { context, .. } => context,
            Self::Io { message, .. } => message,
            Self::Config(msg) | Self::Validation(msg) => msg,
        };
        *slot = if slot.is_empty() {
            outer.to_string()
        } else {
            format!("{outer}: {slot}")
        };
        self
    }
}
