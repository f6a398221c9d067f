//! Asset change computer implementation.

use crate::diff::traits::{AssetChangeSet, ChangeComputer};
use crate::model::Snapshot;

/// Computes asset-level changes: paths present on only one side.
///
/// Changes to an asset's bundle references are not reported here; they
/// surface through the bundles they touch.
pub struct AssetChangeComputer;

impl AssetChangeComputer {
    /// Create a new asset change computer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AssetChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for AssetChangeComputer {
    type ChangeSet = AssetChangeSet;

    fn compute(&self, current: &Snapshot, previous: &Snapshot) -> AssetChangeSet {
        let added = current
            .assets()
            .keys()
            .filter(|path| !previous.assets().contains_key(path.as_str()))
            .cloned()
            .collect();

        let removed = previous
            .assets()
            .keys()
            .filter(|path| !current.assets().contains_key(path.as_str()))
            .cloned()
            .collect();

        AssetChangeSet { added, removed }
    }

    fn name(&self) -> &str {
        "AssetChangeComputer"
    }
}
