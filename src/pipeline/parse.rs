//! Build log parsing stage.
//!
//! Provides functions for loading logs with context for error messages.

use super::PipelineError;
use crate::error::{BundleLogError, ErrorContext, Result as LibResult};
use crate::model::Snapshot;
use crate::parsers::{parse_log_str_with_diagnostics, read_log_file, NormalizeDiagnostics};
use anyhow::Result;
use std::path::Path;

/// A parsed log with its normalization diagnostics
#[derive(Debug, Clone)]
pub struct ParsedLog {
    /// The normalized snapshot
    pub snapshot: Snapshot,
    /// Original file content, served verbatim by the viewer
    pub raw_content: String,
    /// What the normalizer detected and skipped
    pub diagnostics: NormalizeDiagnostics,
}

impl ParsedLog {
    /// Get a reference to the snapshot
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Get a reference to the original file content
    #[must_use]
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// Consume and return the inner snapshot
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }
}

/// Load and normalize a log file.
///
/// A path that does not exist is reported as a missing log rather than a
/// generic I/O failure.
pub fn load_log(path: &Path) -> LibResult<ParsedLog> {
    if !path.is_file() {
        return Err(BundleLogError::missing_log(path));
    }

    let raw_content = read_log_file(path).with_context(|| format!("reading {}", path.display()))?;
    let (snapshot, diagnostics) = parse_log_str_with_diagnostics(&raw_content)
        .with_context(|| format!("parsing {}", path.display()))?;

    Ok(ParsedLog {
        snapshot,
        raw_content,
        diagnostics,
    })
}

/// Load a log with progress logging, for command handlers
pub fn parse_log_with_context(path: &Path, quiet: bool) -> Result<ParsedLog> {
    if !quiet {
        tracing::info!("Parsing build log: {:?}", path);
    }

    let parsed = load_log(path).map_err(|source| PipelineError::ParseFailed {
        path: path.display().to_string(),
        source,
    })?;

    parsed.diagnostics.log_summary();
    if !quiet {
        tracing::info!(
            "Parsed {} assets and {} bundles ({} layout)",
            parsed.snapshot.asset_count(),
            parsed.snapshot.bundle_count(),
            parsed.diagnostics.shape
        );
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::parsers::AssetShape;
    use tempfile::TempDir;

    #[test]
    fn test_load_log_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_log(&tmp.path().join("build_log.json")).unwrap_err();
        assert!(matches!(
            err,
            BundleLogError::Parse {
                source: ParseErrorKind::MissingLog(_),
                ..
            }
        ));
    }

    #[test]
    fn test_load_log_invalid_json_has_path_context() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build_log.json");
        std::fs::write(&path, "{not json").unwrap();

        match load_log(&path).unwrap_err() {
            BundleLogError::Parse { context, source } => {
                assert!(context.starts_with("parsing "));
                assert!(matches!(source, ParseErrorKind::InvalidJson(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_log_with_context_keeps_raw_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build_log.json");
        let content = r#"{"assets": {"a.png": {"b1": ["g1"]}}, "bundles": {}}"#;
        std::fs::write(&path, content).unwrap();

        let parsed = parse_log_with_context(&path, true).unwrap();
        assert_eq!(parsed.raw_content(), content);
        assert_eq!(parsed.snapshot().asset_count(), 1);
        assert_eq!(parsed.diagnostics.shape, AssetShape::Legacy);
    }
}
