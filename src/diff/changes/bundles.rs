//! Bundle change computer implementation.

use crate::diff::traits::{BundleChangeSet, ChangeComputer};
use crate::diff::BundleChange;
use crate::model::{FileEntry, Snapshot};

/// Computes bundle-level changes.
///
/// A bundle present on both sides is modified when its file sequence differs
/// in any entry or in order. CRC values are not compared.
pub struct BundleChangeComputer;

impl BundleChangeComputer {
    /// Create a new bundle change computer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for BundleChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for BundleChangeComputer {
    type ChangeSet = BundleChangeSet;

    fn compute(&self, current: &Snapshot, previous: &Snapshot) -> BundleChangeSet {
        let mut result = BundleChangeSet::new();

        // Added and modified, in current order
        for (hash, bundle) in current.bundles() {
            match previous.bundles().get(hash) {
                None => {
                    result.insert(
                        hash.clone(),
                        BundleChange::Added {
                            files: bundle.files.clone(),
                        },
                    );
                }
                Some(before) if !files_equal(&bundle.files, &before.files) => {
                    result.insert(
                        hash.clone(),
                        BundleChange::Modified {
                            files: bundle.files.clone(),
                        },
                    );
                }
                Some(_) => {}
            }
        }

        // Removed, in previous order, after everything above
        for hash in previous.bundles().keys() {
            if !current.bundles().contains_key(hash) {
                result.insert(hash.clone(), BundleChange::Removed);
            }
        }

        result
    }

    fn name(&self) -> &str {
        "BundleChangeComputer"
    }
}

/// Compare two file sequences entry by entry.
///
/// Sizes compare as written: an absent size differs from `0`, and `10`
/// differs from `10.0`.
#[must_use]
pub fn files_equal(a: &[FileEntry], b: &[FileEntry]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.asset_path == y.asset_path && x.guid == y.guid && x.size == y.size
        })
}
