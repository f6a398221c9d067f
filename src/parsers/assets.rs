//! Converters for the two `assets` layouts.

use super::diagnostics::NormalizeDiagnostics;
use crate::model::{AssetBundles, Guid, SnapshotBuilder};
use serde_json::{Map, Value};

/// Unfold the pair-list layout:
///
/// ```json
/// [{"first": "Assets/a.png", "second": [{"first": "<hash>", "second": ["<guid>"]}]}]
/// ```
///
/// Later entries for the same asset path replace earlier ones.
pub(crate) fn convert_pair_list(
    entries: &[Value],
    builder: &mut SnapshotBuilder,
    diag: &mut NormalizeDiagnostics,
) {
    for (i, entry) in entries.iter().enumerate() {
        let location = format!("assets[{i}]");
        let Some(pair) = entry.as_object() else {
            diag.skip(location, "expected a {first, second} object");
            continue;
        };
        let Some(path) = pair.get("first").and_then(Value::as_str) else {
            diag.skip(location, "missing string `first` (asset path)");
            continue;
        };

        let bundles = match pair.get("second") {
            None | Some(Value::Null) => AssetBundles::new(),
            Some(Value::Array(bundle_pairs)) => {
                unfold_bundle_pairs(bundle_pairs, &location, diag)
            }
            Some(_) => {
                diag.skip(
                    format!("{location}.second"),
                    "`second` is not a list; asset kept without bundles",
                );
                AssetBundles::new()
            }
        };

        if builder.insert_asset(path, bundles) {
            diag.replaced_assets += 1;
        }
    }
}

fn unfold_bundle_pairs(
    pairs: &[Value],
    asset_location: &str,
    diag: &mut NormalizeDiagnostics,
) -> AssetBundles {
    let mut bundles = AssetBundles::new();

    for (j, entry) in pairs.iter().enumerate() {
        let location = format!("{asset_location}.second[{j}]");
        let Some(pair) = entry.as_object() else {
            diag.skip(location, "expected a {first, second} object");
            continue;
        };
        let Some(hash) = pair.get("first").and_then(Value::as_str) else {
            diag.skip(location, "missing string `first` (bundle hash)");
            continue;
        };

        let guids = match pair.get("second") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => guid_list(items, &format!("{location}.second"), diag),
            Some(_) => {
                diag.skip(location, "`second` is not a GUID list");
                continue;
            }
        };

        if bundles.insert(hash.to_string(), guids).is_some() {
            diag.replaced_bundle_pairs += 1;
        }
    }

    bundles
}

/// Copy the legacy object layout (`path -> {hash -> [guid]}`) through.
///
/// An asset whose value is not a mapping is kept with no bundles, the same
/// way the pair list treats a corrupt `second`. `null` and `[]` are read as
/// an empty mapping.
pub(crate) fn convert_legacy(
    assets: &Map<String, Value>,
    builder: &mut SnapshotBuilder,
    diag: &mut NormalizeDiagnostics,
) {
    for (path, value) in assets {
        let location = format!("assets[{path:?}]");
        let raw_bundles = match value {
            Value::Object(raw_bundles) => raw_bundles,
            Value::Null => {
                builder.insert_asset(path.as_str(), AssetBundles::new());
                continue;
            }
            Value::Array(items) if items.is_empty() => {
                builder.insert_asset(path.as_str(), AssetBundles::new());
                continue;
            }
            _ => {
                diag.skip(
                    location,
                    "expected an object of bundle hash -> GUID list; asset kept without bundles",
                );
                builder.insert_asset(path.as_str(), AssetBundles::new());
                continue;
            }
        };

        let mut bundles = AssetBundles::with_capacity(raw_bundles.len());
        for (hash, guids) in raw_bundles {
            let bundle_location = format!("{location}[{hash:?}]");
            let guids = match guids {
                Value::Null => Vec::new(),
                Value::Array(items) => guid_list(items, &bundle_location, diag),
                _ => {
                    diag.skip(bundle_location, "expected a GUID list");
                    continue;
                }
            };
            bundles.insert(hash.clone(), guids);
        }

        builder.insert_asset(path.as_str(), bundles);
    }
}

/// Keep the string items of a GUID list, in order.
fn guid_list(items: &[Value], location: &str, diag: &mut NormalizeDiagnostics) -> Vec<Guid> {
    items
        .iter()
        .enumerate()
        .filter_map(|(k, item)| match item.as_str() {
            Some(guid) => Some(guid.to_string()),
            None => {
                diag.skip(format!("{location}[{k}]"), "GUID is not a string");
                None
            }
        })
        .collect()
}
