//! Snapshot diff engine implementation.

use super::changes::{AssetChangeComputer, BundleChangeComputer};
use super::traits::ChangeComputer;
use super::ChangeReport;
use crate::model::Snapshot;
use std::time::Instant;

/// Diff engine comparing a current snapshot against a previous one.
pub struct DiffEngine {
    assets: AssetChangeComputer,
    bundles: BundleChangeComputer,
}

impl DiffEngine {
    /// Create a new diff engine
    pub fn new() -> Self {
        Self {
            assets: AssetChangeComputer::new(),
            bundles: BundleChangeComputer::new(),
        }
    }

    /// Compare `current` against `previous`.
    ///
    /// Pure and deterministic; neither snapshot is modified. Changes to the
    /// asset side's bundle references are not reported on their own.
    pub fn diff(&self, current: &Snapshot, previous: &Snapshot) -> ChangeReport {
        let started = Instant::now();

        let asset_changes = self.assets.compute(current, previous);
        tracing::trace!(
            computer = self.assets.name(),
            changes = asset_changes.total(),
            "asset changes computed"
        );

        let bundle_changes = self.bundles.compute(current, previous);
        tracing::trace!(
            computer = self.bundles.name(),
            changes = bundle_changes.len(),
            "bundle changes computed"
        );

        let report = ChangeReport {
            added_assets: asset_changes.added,
            removed_assets: asset_changes.removed,
            bundle_changes,
        };

        tracing::debug!(
            total_changes = report.summary().total_changes,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot diff complete"
        );
        report
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare `current` against `previous` with a default engine.
#[must_use]
pub fn diff(current: &Snapshot, previous: &Snapshot) -> ChangeReport {
    DiffEngine::new().diff(current, previous)
}
