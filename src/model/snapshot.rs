//! Core snapshot, bundle and file entry data structures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of a source asset, unique within a snapshot.
pub type AssetPath = String;
/// Hash identifying an output bundle, unique within a snapshot.
pub type BundleHash = String;
/// GUID tying a packed file back to its asset-side record.
pub type Guid = String;

/// Bundle hash -> GUIDs of the asset's files packed into that bundle.
pub type AssetBundles = IndexMap<BundleHash, Vec<Guid>>;

/// One normalized build log - the canonical in-memory model.
///
/// Both historical log shapes are normalized into this structure before any
/// query or comparison. Maps keep the order in which keys were first
/// encountered in the source document.
///
/// The asset side (`assets[a][b]`) and the bundle side (`bundles[b].files`)
/// are sourced independently and are never assumed to agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    assets: IndexMap<AssetPath, AssetBundles>,
    bundles: IndexMap<BundleHash, Bundle>,
}

impl Snapshot {
    /// Create an empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot builder
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Asset path -> bundle mapping, in first-encountered order
    #[must_use]
    pub const fn assets(&self) -> &IndexMap<AssetPath, AssetBundles> {
        &self.assets
    }

    /// Bundle hash -> bundle, in first-encountered order
    #[must_use]
    pub const fn bundles(&self) -> &IndexMap<BundleHash, Bundle> {
        &self.bundles
    }

    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn bundle_count(&self) -> usize {
        self.bundles.len()
    }

    /// True when neither side carries any record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.bundles.is_empty()
    }
}

/// Incremental construction of a [`Snapshot`].
///
/// Inserting an existing key replaces its value but keeps the key at the
/// position where it was first inserted.
#[derive(Debug, Default)]
#[must_use]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    /// Insert (or replace) the bundle mapping of an asset.
    ///
    /// Returns `true` when an earlier record for the same path was replaced.
    pub fn insert_asset(&mut self, path: impl Into<AssetPath>, bundles: AssetBundles) -> bool {
        self.snapshot.assets.insert(path.into(), bundles).is_some()
    }

    /// Insert (or replace) a bundle.
    ///
    /// Returns `true` when an earlier record for the same hash was replaced.
    pub fn insert_bundle(&mut self, hash: impl Into<BundleHash>, bundle: Bundle) -> bool {
        self.snapshot.bundles.insert(hash.into(), bundle).is_some()
    }

    /// Fluent variant of [`insert_asset`](Self::insert_asset)
    pub fn asset(mut self, path: impl Into<AssetPath>, bundles: AssetBundles) -> Self {
        self.insert_asset(path, bundles);
        self
    }

    /// Fluent variant of [`insert_bundle`](Self::insert_bundle)
    pub fn bundle(mut self, hash: impl Into<BundleHash>, bundle: Bundle) -> Self {
        self.insert_bundle(hash, bundle);
        self
    }

    /// Finish building. The returned snapshot is never modified again.
    #[must_use]
    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

/// An output bundle and the files packed into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Opaque checksum, only ever compared for equality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crc: Option<Crc>,
    /// File entries in the order the log lists them
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl Bundle {
    #[must_use]
    pub fn new(crc: Option<Crc>, files: Vec<FileEntry>) -> Self {
        Self { crc, files }
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Sum of all known file sizes; entries without a size are not counted.
    #[must_use]
    pub fn known_size(&self) -> u64 {
        self.files.iter().filter_map(FileEntry::size_bytes).sum()
    }
}

/// Bundle checksum as written by the producing tool (string or number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Crc {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Crc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Crc {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Crc {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A file inside a bundle.
///
/// `size: None` means the size is unknown, which is not the same as a
/// zero-byte file. Equality compares every field, including the absence of
/// a size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub asset_path: AssetPath,
    pub guid: Guid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<serde_json::Number>,
}

impl FileEntry {
    /// Create a file entry with unknown size
    pub fn new(asset_path: impl Into<AssetPath>, guid: impl Into<Guid>) -> Self {
        Self {
            asset_path: asset_path.into(),
            guid: guid.into(),
            size: None,
        }
    }

    /// Set a known size
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Size as an integer byte count, if known and integral
    #[must_use]
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_ref().and_then(serde_json::Number::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_first_position_on_replace() {
        let mut builder = Snapshot::builder();
        builder.insert_asset("a.png", AssetBundles::new());
        builder.insert_asset("b.png", AssetBundles::new());
        let mut replacement = AssetBundles::new();
        replacement.insert("b1".to_string(), vec!["g1".to_string()]);
        assert!(builder.insert_asset("a.png", replacement));

        let snapshot = builder.build();
        let keys: Vec<_> = snapshot.assets().keys().collect();
        assert_eq!(keys, ["a.png", "b.png"]);
        assert_eq!(snapshot.assets()["a.png"]["b1"], vec!["g1".to_string()]);
    }

    #[test]
    fn test_size_absent_differs_from_zero() {
        let unknown = FileEntry::new("a.png", "g1");
        let zero = FileEntry::new("a.png", "g1").with_size(0);
        assert_ne!(unknown, zero);
        assert_eq!(zero.size_bytes(), Some(0));
        assert_eq!(unknown.size_bytes(), None);
    }

    #[test]
    fn test_file_entry_serialization_omits_unknown_size() {
        let json = serde_json::to_string(&FileEntry::new("a.png", "g1")).unwrap();
        assert_eq!(json, r#"{"asset_path":"a.png","guid":"g1"}"#);

        let json = serde_json::to_string(&FileEntry::new("a.png", "g1").with_size(10)).unwrap();
        assert_eq!(json, r#"{"asset_path":"a.png","guid":"g1","size":10}"#);
    }

    #[test]
    fn test_crc_variants() {
        let num: Crc = serde_json::from_str("12345").unwrap();
        let text: Crc = serde_json::from_str(r#""12345""#).unwrap();
        assert_eq!(num, Crc::from(12345_u64));
        assert_eq!(text, Crc::from("12345"));
        assert_ne!(num, text);
        assert_eq!(num.to_string(), text.to_string());
    }

    #[test]
    fn test_bundle_known_size() {
        let bundle = Bundle::new(
            None,
            vec![
                FileEntry::new("a.png", "g1").with_size(10),
                FileEntry::new("b.png", "g2"),
                FileEntry::new("c.png", "g3").with_size(5),
            ],
        );
        assert_eq!(bundle.known_size(), 15);
        assert_eq!(bundle.file_count(), 3);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.asset_count(), 0);
        assert_eq!(snapshot.bundle_count(), 0);
    }
}
