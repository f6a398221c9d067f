//! Build log normalizer.
//!
//! This module turns a raw `build_log.json` document into the canonical
//! [`Snapshot`]. Two generations of the bundling tool wrote the asset side
//! differently; both are accepted transparently.
//!
//! ## Shape Detection
//!
//! - `assets` is an array of `{first, second}` pairs: unfolded into maps
//! - `assets` is an object keyed by asset path: copied through
//! - `assets` missing: empty asset map
//!
//! The `bundles` section has a single layout and is copied through.
//!
//! Normalization never fails. Malformed records are skipped and reported in
//! [`NormalizeDiagnostics`], so one corrupt record does not hide the rest of
//! the log.
//!
//! ## Usage
//!
//! ```no_run
//! use bundle_log_tools::parsers::{normalize, parse_log};
//! use std::path::Path;
//!
//! let snapshot = parse_log(Path::new("build_log.json")).unwrap();
//!
//! let raw = serde_json::json!({"assets": {"a.png": {"b1": ["g1"]}}});
//! let snapshot = normalize(&raw);
//! assert_eq!(snapshot.asset_count(), 1);
//! ```

mod assets;
mod bundles;
mod detection;
mod diagnostics;
mod traits;

pub use detection::{detect_asset_shape, detect_assets, AssetShape, DetectedAssets};
pub use diagnostics::{NormalizeDiagnostics, SkippedRecord};
pub use traits::ParseError;

use crate::model::Snapshot;
use serde_json::Value;
use std::path::Path;

/// Normalize a raw log document into a [`Snapshot`].
#[must_use]
pub fn normalize(raw: &Value) -> Snapshot {
    normalize_with_diagnostics(raw).0
}

/// Normalize a raw log document, also returning what was detected and
/// skipped along the way.
#[must_use]
pub fn normalize_with_diagnostics(raw: &Value) -> (Snapshot, NormalizeDiagnostics) {
    let detected = detect_assets(raw);
    let mut diag = NormalizeDiagnostics::new(detected.shape());
    let mut builder = Snapshot::builder();

    if !raw.is_object() {
        diag.skip("$", "log document is not a JSON object");
        return (builder.build(), diag);
    }

    tracing::debug!("Detected asset layout: {}", detected.shape());

    match detected {
        DetectedAssets::PairList(entries) => {
            assets::convert_pair_list(entries, &mut builder, &mut diag);
        }
        DetectedAssets::Legacy(map) => assets::convert_legacy(map, &mut builder, &mut diag),
        DetectedAssets::Absent => {}
        DetectedAssets::Unrecognized(_) => {
            diag.skip("assets", "expected a pair list or an object");
        }
    }

    bundles::convert_bundles(raw, &mut builder, &mut diag);

    (builder.build(), diag)
}

/// Maximum log file size (512 MB).
pub const MAX_LOG_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Read and normalize a log file.
///
/// Returns an error if the file cannot be read, exceeds
/// [`MAX_LOG_FILE_SIZE`], or is not valid JSON.
pub fn parse_log(path: &Path) -> Result<Snapshot, ParseError> {
    let content = read_log_file(path)?;
    parse_log_str(&content)
}

/// Parse log text and normalize it.
///
/// Only invalid JSON is an error; the structure is normalized leniently.
pub fn parse_log_str(content: &str) -> Result<Snapshot, ParseError> {
    parse_log_str_with_diagnostics(content).map(|(snapshot, _)| snapshot)
}

/// Parse log text, returning the snapshot and its normalization diagnostics.
pub fn parse_log_str_with_diagnostics(
    content: &str,
) -> Result<(Snapshot, NormalizeDiagnostics), ParseError> {
    let raw: Value = serde_json::from_str(content)?;
    Ok(normalize_with_diagnostics(&raw))
}

/// Read a log file into memory, enforcing the size limit.
pub fn read_log_file(path: &Path) -> Result<String, ParseError> {
    let metadata = std::fs::metadata(path).map_err(|e| ParseError::IoError(e.to_string()))?;
    if metadata.len() > MAX_LOG_FILE_SIZE {
        return Err(ParseError::TooLarge {
            size_mb: metadata.len() / (1024 * 1024),
            limit_mb: MAX_LOG_FILE_SIZE / (1024 * 1024),
        });
    }
    std::fs::read_to_string(path).map_err(|e| ParseError::IoError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Crc, FileEntry};
    use serde_json::json;

    #[test]
    fn test_normalize_pair_list() {
        let raw = json!({
            "assets": [
                {"first": "Assets/a.png", "second": [
                    {"first": "b1", "second": ["g1", "g2"]},
                    {"first": "b2", "second": ["g3"]}
                ]},
                {"first": "Assets/b.png", "second": []}
            ]
        });
        let (snapshot, diag) = normalize_with_diagnostics(&raw);

        assert_eq!(diag.shape, AssetShape::PairList);
        assert!(diag.is_clean());
        assert_eq!(snapshot.asset_count(), 2);
        assert_eq!(snapshot.assets()["Assets/a.png"]["b1"], ["g1", "g2"]);
        assert_eq!(snapshot.assets()["Assets/a.png"]["b2"], ["g3"]);
        assert!(snapshot.assets()["Assets/b.png"].is_empty());
        assert_eq!(snapshot.bundle_count(), 0);
    }

    #[test]
    fn test_normalize_legacy_object() {
        let raw = json!({
            "assets": {"Assets/a.png": {"b1": ["g1"]}, "Assets/b.png": {}},
            "bundles": {"b1": {"crc": 42, "files": [{"asset_path": "Assets/a.png", "guid": "g1", "size": 10}]}}
        });
        let (snapshot, diag) = normalize_with_diagnostics(&raw);

        assert_eq!(diag.shape, AssetShape::Legacy);
        assert!(diag.is_clean());
        assert_eq!(snapshot.assets()["Assets/a.png"]["b1"], ["g1"]);
        assert!(snapshot.assets()["Assets/b.png"].is_empty());

        let bundle = &snapshot.bundles()["b1"];
        assert_eq!(bundle.crc, Some(Crc::from(42_u64)));
        assert_eq!(
            bundle.files,
            vec![FileEntry::new("Assets/a.png", "g1").with_size(10)]
        );
    }

    #[test]
    fn test_missing_keys_yield_empty_snapshot() {
        let (snapshot, diag) = normalize_with_diagnostics(&json!({}));
        assert!(snapshot.is_empty());
        assert_eq!(diag.shape, AssetShape::Absent);
        assert!(diag.is_clean());
    }

    #[test]
    fn test_non_object_document_yields_empty_snapshot() {
        let (snapshot, diag) = normalize_with_diagnostics(&json!([1, 2]));
        assert!(snapshot.is_empty());
        assert_eq!(diag.skipped.len(), 1);
        assert_eq!(diag.skipped[0].location, "$");
    }

    #[test]
    fn test_missing_second_means_no_bundles() {
        let raw = json!({"assets": [
            {"first": "Assets/a.png"},
            {"first": "Assets/b.png", "second": [{"first": "b1"}]}
        ]});
        let (snapshot, diag) = normalize_with_diagnostics(&raw);

        assert!(diag.is_clean());
        assert!(snapshot.assets()["Assets/a.png"].is_empty());
        assert!(snapshot.assets()["Assets/b.png"]["b1"].is_empty());
    }

    #[test]
    fn test_duplicate_asset_last_wins_first_position_kept() {
        let raw = json!({"assets": [
            {"first": "Assets/a.png", "second": [{"first": "b1", "second": ["old"]}]},
            {"first": "Assets/b.png", "second": []},
            {"first": "Assets/a.png", "second": [{"first": "b2", "second": ["new"]}]}
        ]});
        let (snapshot, diag) = normalize_with_diagnostics(&raw);

        assert_eq!(diag.replaced_assets, 1);
        let keys: Vec<_> = snapshot.assets().keys().map(String::as_str).collect();
        assert_eq!(keys, ["Assets/a.png", "Assets/b.png"]);
        // The later entry replaces the whole bundle mapping
        assert!(!snapshot.assets()["Assets/a.png"].contains_key("b1"));
        assert_eq!(snapshot.assets()["Assets/a.png"]["b2"], ["new"]);
    }

    #[test]
    fn test_duplicate_bundle_pair_last_wins() {
        let raw = json!({"assets": [
            {"first": "Assets/a.png", "second": [
                {"first": "b1", "second": ["g1"]},
                {"first": "b1", "second": ["g2"]}
            ]}
        ]});
        let (snapshot, diag) = normalize_with_diagnostics(&raw);

        assert_eq!(diag.replaced_bundle_pairs, 1);
        assert_eq!(snapshot.assets()["Assets/a.png"]["b1"], ["g2"]);
    }

    #[test]
    fn test_corrupt_records_are_skipped() {
        let raw = json!({
            "assets": [
                "not an object",
                {"second": []},
                {"first": "Assets/a.png", "second": [
                    42,
                    {"first": "b1", "second": ["g1", 7, "g2"]},
                    {"first": "b2", "second": "oops"}
                ]},
                {"first": "Assets/b.png", "second": {"bad": true}}
            ],
            "bundles": {
                "b1": {"crc": "x", "files": [
                    {"asset_path": "Assets/a.png", "guid": "g1"},
                    {"guid": "g2"},
                    "junk",
                    {"asset_path": "Assets/a.png", "guid": "g2", "size": "big"}
                ]},
                "b2": "junk"
            }
        });
        let (snapshot, diag) = normalize_with_diagnostics(&raw);

        assert_eq!(snapshot.asset_count(), 2);
        assert_eq!(snapshot.assets()["Assets/a.png"].len(), 1);
        assert_eq!(snapshot.assets()["Assets/a.png"]["b1"], ["g1", "g2"]);
        assert!(snapshot.assets()["Assets/b.png"].is_empty());

        assert_eq!(snapshot.bundle_count(), 1);
        assert_eq!(
            snapshot.bundles()["b1"].files,
            vec![
                FileEntry::new("Assets/a.png", "g1"),
                FileEntry::new("Assets/a.png", "g2"),
            ]
        );

        let locations: Vec<_> = diag.skipped.iter().map(|s| s.location.as_str()).collect();
        assert!(locations.contains(&"assets[0]"));
        assert!(locations.contains(&"assets[1]"));
        assert!(locations.contains(&"assets[2].second[0]"));
        assert!(locations.contains(&"assets[2].second[1].second[1]"));
        assert!(locations.contains(&"assets[2].second[2]"));
        assert!(locations.contains(&"assets[3].second"));
        assert!(locations.contains(&r#"bundles["b1"].files[1]"#));
        assert!(locations.contains(&r#"bundles["b1"].files[2]"#));
        assert!(locations.contains(&r#"bundles["b1"].files[3].size"#));
        assert!(locations.contains(&r#"bundles["b2"]"#));
        assert_eq!(diag.skipped.len(), 10);
    }

    #[test]
    fn test_corrupt_asset_values_kept_in_both_layouts() {
        let pair_list = json!({"assets": [
            {"first": "A.png", "second": "x"},
            {"first": "B.png", "second": []},
            {"first": "C.png", "second": null}
        ]});
        let legacy = json!({"assets": {"A.png": "x", "B.png": [], "C.png": null}});

        let (from_pairs, pair_diag) = normalize_with_diagnostics(&pair_list);
        let (from_legacy, legacy_diag) = normalize_with_diagnostics(&legacy);

        let paths: Vec<_> = from_legacy.assets().keys().map(String::as_str).collect();
        assert_eq!(paths, ["A.png", "B.png", "C.png"]);
        assert!(from_legacy.assets().values().all(|bundles| bundles.is_empty()));
        assert_eq!(from_legacy, from_pairs);
        assert!(crate::diff::diff(&from_legacy, &from_pairs).is_empty());

        assert_eq!(legacy_diag.skipped.len(), 1);
        assert_eq!(legacy_diag.skipped[0].location, r#"assets["A.png"]"#);
        assert_eq!(pair_diag.skipped.len(), 1);
    }

    #[test]
    fn test_null_size_is_unknown() {
        let raw = json!({"bundles": {"b1": {"crc": 1, "files": [
            {"asset_path": "a", "guid": "g", "size": null}
        ]}}});
        let snapshot = normalize(&raw);
        assert_eq!(snapshot.bundles()["b1"].files[0].size, None);
    }

    #[test]
    fn test_unrecognized_assets_section() {
        let raw = json!({"assets": "garbage", "bundles": {"b1": {"crc": 1, "files": []}}});
        let (snapshot, diag) = normalize_with_diagnostics(&raw);

        assert_eq!(diag.shape, AssetShape::Unrecognized);
        assert_eq!(snapshot.asset_count(), 0);
        assert_eq!(snapshot.bundle_count(), 1);
    }

    #[test]
    fn test_order_follows_document() {
        let raw = json!({"assets": {"z.png": {}, "a.png": {}, "m.png": {}}});
        let snapshot = normalize(&raw);
        let keys: Vec<_> = snapshot.assets().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z.png", "a.png", "m.png"]);
    }

    #[test]
    fn test_parse_log_str_invalid_json() {
        let err = parse_log_str("{not json").unwrap_err();
        assert!(matches!(err, ParseError::JsonError(_)));
    }

    #[test]
    fn test_parse_log_missing_file() {
        let err = parse_log(Path::new("/definitely/not/here/build_log.json")).unwrap_err();
        assert!(matches!(err, ParseError::IoError(_)));
    }
}
