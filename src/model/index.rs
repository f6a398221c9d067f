//! Dependency index for snapshot queries.
//!
//! [`DependencyIndex`] is the read-only query surface the viewer and the CLI
//! use: bundle counts per asset, bundle lookups, GUIDs per asset/bundle pair,
//! and the reverse "which bundles contain this asset" lookup.
//!
//! # Example
//!
//! ```ignore
//! use bundle_log_tools::model::DependencyIndex;
//!
//! let snapshot = parse_log(&path)?;
//! let index = DependencyIndex::build(&snapshot);
//!
//! let count = index.bundle_count_for_asset("Assets/UI/icon.png");
//! let guids = index.guids_for_asset_bundle("Assets/UI/icon.png", "3f2a...");
//! ```

use super::{Bundle, Snapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Column an asset table can be sorted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AssetSortKey {
    /// Keep the order of the log
    #[default]
    None,
    /// Asset path, lexicographic
    Path,
    /// Number of bundles the asset maps to, numeric
    Bundles,
}

/// Sort direction for asset tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One row of the asset table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRow<'a> {
    pub path: &'a str,
    pub bundle_count: usize,
}

/// Precomputed read-only view over a [`Snapshot`].
///
/// Building is O(assets + file entries); the reverse asset -> bundle lookup
/// is then O(1). Absent keys are never an error: counts are 0, lists are
/// empty and bundle lookups return `None`.
#[derive(Debug, Clone)]
#[must_use]
pub struct DependencyIndex<'a> {
    snapshot: &'a Snapshot,
    /// Asset path -> hashes of bundles whose file entries name that asset
    referencing: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> DependencyIndex<'a> {
    /// Build an index over a snapshot.
    pub fn build(snapshot: &'a Snapshot) -> Self {
        let mut referencing: HashMap<&'a str, Vec<&'a str>> = HashMap::new();

        for (hash, bundle) in snapshot.bundles() {
            for file in &bundle.files {
                let hashes = referencing.entry(file.asset_path.as_str()).or_default();
                // A bundle may list several files of the same asset
                if hashes.last() != Some(&hash.as_str()) {
                    hashes.push(hash.as_str());
                }
            }
        }

        Self {
            snapshot,
            referencing,
        }
    }

    /// The indexed snapshot
    #[must_use]
    pub const fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// Number of distinct bundle hashes the asset maps to; 0 if unknown.
    #[must_use]
    pub fn bundle_count_for_asset(&self, path: &str) -> usize {
        self.snapshot.assets().get(path).map_or(0, |b| b.len())
    }

    /// Look up a bundle by hash.
    #[must_use]
    pub fn bundle(&self, hash: &str) -> Option<&'a Bundle> {
        self.snapshot.bundles().get(hash)
    }

    /// GUIDs recorded for the asset inside the given bundle.
    ///
    /// Returns an empty slice if either the asset or the bundle is absent.
    #[must_use]
    pub fn guids_for_asset_bundle(&self, path: &str, hash: &str) -> &'a [String] {
        self.snapshot
            .assets()
            .get(path)
            .and_then(|bundles| bundles.get(hash))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Hashes of bundles whose file list contains an entry for the asset,
    /// in bundle order.
    #[must_use]
    pub fn bundles_referencing_asset(&self, path: &str) -> &[&'a str] {
        self.referencing
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Asset paths matching a case-insensitive substring query.
    ///
    /// The query is matched against the path, the asset's bundle hashes and
    /// its GUIDs. An empty query matches every asset.
    #[must_use]
    pub fn search_assets(&self, query: &str) -> Vec<&'a str> {
        let query = query.trim().to_lowercase();
        self.snapshot
            .assets()
            .iter()
            .filter(|(path, bundles)| {
                query.is_empty()
                    || path.to_lowercase().contains(&query)
                    || bundles.iter().any(|(hash, guids)| {
                        hash.to_lowercase().contains(&query)
                            || guids.iter().any(|g| g.to_lowercase().contains(&query))
                    })
            })
            .map(|(path, _)| path.as_str())
            .collect()
    }

    /// Asset table rows, optionally filtered and sorted.
    ///
    /// Sorting is stable: rows with equal keys keep snapshot order.
    #[must_use]
    pub fn asset_rows(
        &self,
        query: Option<&str>,
        key: AssetSortKey,
        direction: SortDirection,
    ) -> Vec<AssetRow<'a>> {
        let paths = match query {
            Some(q) => self.search_assets(q),
            None => self.snapshot.assets().keys().map(String::as_str).collect(),
        };

        let mut rows: Vec<AssetRow<'a>> = paths
            .into_iter()
            .map(|path| AssetRow {
                path,
                bundle_count: self.bundle_count_for_asset(path),
            })
            .collect();

        let compare = |a: &AssetRow<'_>, b: &AssetRow<'_>| -> Ordering {
            match key {
                AssetSortKey::None => Ordering::Equal,
                AssetSortKey::Path => a.path.cmp(b.path),
                AssetSortKey::Bundles => a.bundle_count.cmp(&b.bundle_count),
            }
        };

        match direction {
            SortDirection::Asc => rows.sort_by(compare),
            SortDirection::Desc => rows.sort_by(|a, b| compare(b, a)),
        }
        rows
    }

    /// Total number of GUIDs recorded on the asset side.
    #[must_use]
    pub fn total_guid_count(&self) -> usize {
        self.snapshot
            .assets()
            .values()
            .flat_map(|bundles| bundles.values())
            .map(Vec::len)
            .sum()
    }

    /// Total number of file entries on the bundle side.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.snapshot.bundles().values().map(Bundle::file_count).sum()
    }
}
