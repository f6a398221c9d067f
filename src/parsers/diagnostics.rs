//! Record-level diagnostics collected during normalization.

use super::detection::AssetShape;
use serde::Serialize;

/// A raw record that was dropped (or partially dropped) during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// JSON location of the record, e.g. `assets[3].second[1]`
    pub location: String,
    /// Why the record could not be used
    pub reason: String,
}

/// Outcome details of one normalization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeDiagnostics {
    /// Detected layout of the `assets` section
    pub shape: AssetShape,
    /// Records skipped because they were malformed
    pub skipped: Vec<SkippedRecord>,
    /// Asset entries that overwrote an earlier entry with the same path
    pub replaced_assets: usize,
    /// Bundle pairs that overwrote an earlier pair with the same hash
    /// inside one asset's list
    pub replaced_bundle_pairs: usize,
}

impl NormalizeDiagnostics {
    pub(crate) const fn new(shape: AssetShape) -> Self {
        Self {
            shape,
            skipped: Vec::new(),
            replaced_assets: 0,
            replaced_bundle_pairs: 0,
        }
    }

    pub(crate) fn skip(&mut self, location: impl Into<String>, reason: impl Into<String>) {
        let record = SkippedRecord {
            location: location.into(),
            reason: reason.into(),
        };
        tracing::warn!(location = %record.location, "Skipping record: {}", record.reason);
        self.skipped.push(record);
    }

    /// True when every record was used as-is
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Log a single summary line if anything was skipped or overwritten.
    pub fn log_summary(&self) {
        if !self.skipped.is_empty() {
            tracing::info!(
                skipped = self.skipped.len(),
                "Normalized the log with {} malformed record(s) skipped",
                self.skipped.len()
            );
        }
        if self.replaced_assets > 0 || self.replaced_bundle_pairs > 0 {
            tracing::info!(
                replaced_assets = self.replaced_assets,
                replaced_bundle_pairs = self.replaced_bundle_pairs,
                "Duplicate keys in the log were resolved by keeping the last occurrence"
            );
        }
    }
}
