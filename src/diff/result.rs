//! Change report types.

use crate::model::{AssetPath, BundleHash, FileEntry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result of comparing a current snapshot against a previous one.
///
/// Serializes to the viewer's wire format:
///
/// ```json
/// {"addedAssets": [], "removedAssets": [], "bundleChanges": {"<hash>": {"status": "removed"}}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeReport {
    /// Asset paths present now but not before, in current order
    pub added_assets: Vec<AssetPath>,
    /// Asset paths present before but not now, in previous order
    pub removed_assets: Vec<AssetPath>,
    /// Per-bundle changes; unchanged bundles have no entry
    pub bundle_changes: IndexMap<BundleHash, BundleChange>,
}

impl ChangeReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the two snapshots had no observable drift
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_assets.is_empty()
            && self.removed_assets.is_empty()
            && self.bundle_changes.is_empty()
    }

    /// Number of asset and bundle entries in the report
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.added_assets.len() + self.removed_assets.len() + self.bundle_changes.len()
    }

    /// Count changes by category
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary {
            assets_added: self.added_assets.len(),
            assets_removed: self.removed_assets.len(),
            ..DiffSummary::default()
        };
        for change in self.bundle_changes.values() {
            match change.status() {
                ChangeStatus::Added => summary.bundles_added += 1,
                ChangeStatus::Removed => summary.bundles_removed += 1,
                ChangeStatus::Modified => summary.bundles_modified += 1,
            }
        }
        summary.total_changes = summary.assets_added
            + summary.assets_removed
            + summary.bundles_added
            + summary.bundles_removed
            + summary.bundles_modified;
        summary
    }

    /// Bundle changes with the given status, in report order
    pub fn bundles_with_status(
        &self,
        status: ChangeStatus,
    ) -> impl Iterator<Item = (&BundleHash, &BundleChange)> {
        self.bundle_changes
            .iter()
            .filter(move |(_, change)| change.status() == status)
    }
}

/// Change recorded for one bundle hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BundleChange {
    /// Present now, absent before; carries the current files
    Added { files: Vec<FileEntry> },
    /// Present before, absent now
    Removed,
    /// Present in both with a different file sequence; carries the current files
    Modified { files: Vec<FileEntry> },
}

impl BundleChange {
    #[must_use]
    pub const fn status(&self) -> ChangeStatus {
        match self {
            Self::Added { .. } => ChangeStatus::Added,
            Self::Removed => ChangeStatus::Removed,
            Self::Modified { .. } => ChangeStatus::Modified,
        }
    }

    /// Current file entries, for added and modified bundles
    #[must_use]
    pub fn files(&self) -> Option<&[FileEntry]> {
        match self {
            Self::Added { files } | Self::Modified { files } => Some(files),
            Self::Removed => None,
        }
    }
}

/// Status tag of a [`BundleChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Removed,
    Modified,
}

impl ChangeStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
        }
    }

    /// One-character marker used by text reports
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Removed => '-',
            Self::Modified => '~',
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change counts of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub assets_added: usize,
    pub assets_removed: usize,
    pub bundles_added: usize,
    pub bundles_removed: usize,
    pub bundles_modified: usize,
    pub total_changes: usize,
}
