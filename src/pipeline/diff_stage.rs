//! Diff computation stage.

use crate::diff::{ChangeReport, DiffEngine};
use crate::model::Snapshot;

/// Run the diff of `current` against `previous`, logging a one-line summary.
#[must_use]
pub fn compute_diff(current: &Snapshot, previous: &Snapshot, quiet: bool) -> ChangeReport {
    if !quiet {
        tracing::info!("Computing build log diff...");
    }

    let report = DiffEngine::new().diff(current, previous);

    if !quiet {
        let summary = report.summary();
        tracing::info!(
            "Diff complete: {} assets added, {} removed; {} bundles added, {} removed, {} modified",
            summary.assets_added,
            summary.assets_removed,
            summary.bundles_added,
            summary.bundles_removed,
            summary.bundles_modified
        );
    }

    report
}
