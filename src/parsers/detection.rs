//! Asset-side shape detection.
//!
//! Two generations of the bundling tool wrote the `assets` section
//! differently. The shape is decided once, up front, and the matching
//! converter is selected from the result; converters never probe the JSON
//! to guess the layout.

use serde::Serialize;
use serde_json::Value;

/// Layout of the `assets` section of a raw build log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetShape {
    /// Array of `{first, second}` pairs emitted by an ordered-map serializer
    PairList,
    /// Object keyed by asset path, already in map form
    Legacy,
    /// No `assets` key (or `null`)
    Absent,
    /// Present but neither an array nor an object
    Unrecognized,
}

impl AssetShape {
    /// Human-readable name for logs and reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PairList => "pair-list",
            Self::Legacy => "legacy-object",
            Self::Absent => "absent",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for AssetShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Detected asset section, borrowing the payload for its converter.
#[derive(Debug, Clone, Copy)]
pub enum DetectedAssets<'a> {
    PairList(&'a [Value]),
    Legacy(&'a serde_json::Map<String, Value>),
    Absent,
    Unrecognized(&'a Value),
}

impl DetectedAssets<'_> {
    /// The shape tag of this detection
    #[must_use]
    pub const fn shape(&self) -> AssetShape {
        match self {
            Self::PairList(_) => AssetShape::PairList,
            Self::Legacy(_) => AssetShape::Legacy,
            Self::Absent => AssetShape::Absent,
            Self::Unrecognized(_) => AssetShape::Unrecognized,
        }
    }
}

/// Classify the `assets` section of a raw log document.
///
/// A sequence selects the pair-list shape, an object selects the legacy
/// shape, and a missing key (or a non-object document) yields `Absent`.
#[must_use]
pub fn detect_assets(raw: &Value) -> DetectedAssets<'_> {
    match raw.get("assets") {
        Some(Value::Array(entries)) => DetectedAssets::PairList(entries),
        Some(Value::Object(map)) => DetectedAssets::Legacy(map),
        None | Some(Value::Null) => DetectedAssets::Absent,
        Some(other) => DetectedAssets::Unrecognized(other),
    }
}

/// Shape of the `assets` section without borrowing its payload.
#[must_use]
pub fn detect_asset_shape(raw: &Value) -> AssetShape {
    detect_assets(raw).shape()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_pair_list() {
        let raw = json!({"assets": [{"first": "a.png", "second": []}]});
        assert_eq!(detect_asset_shape(&raw), AssetShape::PairList);
    }

    #[test]
    fn test_detect_empty_pair_list() {
        let raw = json!({"assets": []});
        assert_eq!(detect_asset_shape(&raw), AssetShape::PairList);
    }

    #[test]
    fn test_detect_legacy() {
        let raw = json!({"assets": {"a.png": {"b1": ["g1"]}}});
        assert_eq!(detect_asset_shape(&raw), AssetShape::Legacy);
    }

    #[test]
    fn test_detect_absent() {
        assert_eq!(detect_asset_shape(&json!({})), AssetShape::Absent);
        assert_eq!(
            detect_asset_shape(&json!({"assets": null})),
            AssetShape::Absent
        );
        // A non-object document has no `assets` key at all
        assert_eq!(detect_asset_shape(&json!([1, 2, 3])), AssetShape::Absent);
    }

    #[test]
    fn test_detect_unrecognized() {
        assert_eq!(
            detect_asset_shape(&json!({"assets": "oops"})),
            AssetShape::Unrecognized
        );
        assert_eq!(
            detect_asset_shape(&json!({"assets": 42})),
            AssetShape::Unrecognized
        );
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(AssetShape::PairList.to_string(), "pair-list");
        assert_eq!(AssetShape::Legacy.name(), "legacy-object");
    }
}
