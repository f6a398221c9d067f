//! Trait definitions for diff computation strategies.
//!
//! Each section of a build log (assets, bundles) has its own change
//! computer so the engine can be assembled from independently testable parts.

use super::BundleChange;
use crate::model::{AssetPath, BundleHash, Snapshot};
use indexmap::IndexMap;

/// Trait for computing one category of change between two snapshots.
pub trait ChangeComputer: Send + Sync {
    /// The type of changes this computer produces.
    type ChangeSet;

    /// Compute changes from `previous` to `current`.
    fn compute(&self, current: &Snapshot, previous: &Snapshot) -> Self::ChangeSet;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}

/// Asset paths that appeared or disappeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetChangeSet {
    pub added: Vec<AssetPath>,
    pub removed: Vec<AssetPath>,
}

impl AssetChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Bundle changes keyed by hash, in emission order.
pub type BundleChangeSet = IndexMap<BundleHash, BundleChange>;
