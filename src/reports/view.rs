//! Resolution of a view target against a snapshot.
//!
//! Every reporter renders the same resolved data, so filtering and sorting
//! happen once here and nowhere else.

use crate::config::ViewTarget;
use crate::model::{AssetBundles, AssetRow, Bundle, DependencyIndex, Snapshot};
use serde::Serialize;

/// Data shown by a view report.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewData<'a> {
    /// Asset table
    Assets {
        rows: Vec<AssetRow<'a>>,
        total_assets: usize,
        total_bundles: usize,
    },
    /// One asset: its bundle map (with GUIDs) and the bundles packing it
    Asset {
        path: &'a str,
        bundles: Option<&'a AssetBundles>,
        packed_into: Vec<&'a str>,
    },
    /// One bundle's content
    Bundle {
        hash: &'a str,
        bundle: Option<&'a Bundle>,
    },
}

impl<'a> ViewData<'a> {
    /// Resolve `target` against the snapshot.
    pub fn resolve(snapshot: &'a Snapshot, target: &'a ViewTarget) -> Self {
        let index = DependencyIndex::build(snapshot);
        match target {
            ViewTarget::Assets {
                search,
                sort,
                direction,
            } => Self::Assets {
                rows: index.asset_rows(search.as_deref(), *sort, *direction),
                total_assets: snapshot.asset_count(),
                total_bundles: snapshot.bundle_count(),
            },
            ViewTarget::Asset(path) => Self::Asset {
                path,
                bundles: snapshot.assets().get(path.as_str()),
                packed_into: index.bundles_referencing_asset(path).to_vec(),
            },
            ViewTarget::Bundle(hash) => Self::Bundle {
                hash,
                bundle: index.bundle(hash),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetSortKey, FileEntry, SortDirection};

    fn snapshot() -> Snapshot {
        let mut refs = AssetBundles::new();
        refs.insert("b1".to_string(), vec!["g1".to_string()]);
        Snapshot::builder()
            .asset("a.png", refs)
            .asset("z.png", AssetBundles::new())
            .bundle("b1", Bundle::new(None, vec![FileEntry::new("a.png", "g1")]))
            .build()
    }

    #[test]
    fn test_resolve_sorted_assets() {
        let snapshot = snapshot();
        let target = ViewTarget::Assets {
            search: None,
            sort: AssetSortKey::Bundles,
            direction: SortDirection::Desc,
        };
        match ViewData::resolve(&snapshot, &target) {
            ViewData::Assets {
                rows, total_assets, ..
            } => {
                assert_eq!(total_assets, 2);
                assert_eq!(rows[0].path, "a.png");
                assert_eq!(rows[1].path, "z.png");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_resolve_asset() {
        let snapshot = snapshot();
        let target = ViewTarget::Asset("a.png".to_string());
        match ViewData::resolve(&snapshot, &target) {
            ViewData::Asset {
                bundles,
                packed_into,
                ..
            } => {
                assert_eq!(bundles.map(|b| b.len()), Some(1));
                assert_eq!(packed_into, ["b1"]);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_resolve_missing_bundle() {
        let snapshot = snapshot();
        let target = ViewTarget::Bundle("nope".to_string());
        let data = ViewData::resolve(&snapshot, &target);
        assert!(matches!(data, ViewData::Bundle { bundle: None, .. }));
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["view"], "bundle");
        assert!(json["bundle"].is_null());
    }
}
