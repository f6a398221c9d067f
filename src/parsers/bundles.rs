//! Converter for the `bundles` section.
//!
//! The bundle side has kept one layout across both tool generations:
//!
//! ```json
//! {"<hash>": {"crc": 123, "files": [{"asset_path": "...", "guid": "...", "size": 10}]}}
//! ```

use super::diagnostics::NormalizeDiagnostics;
use crate::model::{Bundle, Crc, FileEntry, SnapshotBuilder};
use serde_json::{Map, Value};

/// Copy the bundle map through, typing each record once.
pub(crate) fn convert_bundles(
    raw: &Value,
    builder: &mut SnapshotBuilder,
    diag: &mut NormalizeDiagnostics,
) {
    match raw.get("bundles") {
        None | Some(Value::Null) => {}
        Some(Value::Object(bundles)) => {
            for (hash, value) in bundles {
                if let Some(bundle) = convert_bundle(hash, value, diag) {
                    builder.insert_bundle(hash.as_str(), bundle);
                }
            }
        }
        Some(_) => diag.skip("bundles", "expected an object of bundle hash -> bundle"),
    }
}

fn convert_bundle(hash: &str, value: &Value, diag: &mut NormalizeDiagnostics) -> Option<Bundle> {
    let location = format!("bundles[{hash:?}]");
    let Some(record) = value.as_object() else {
        diag.skip(location, "expected a {crc, files} object");
        return None;
    };

    let crc = convert_crc(record, &location, diag);

    let files = match record.get("files") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                convert_file_entry(entry, &format!("{location}.files[{i}]"), diag)
            })
            .collect(),
        Some(_) => {
            diag.skip(
                format!("{location}.files"),
                "`files` is not a list; bundle kept without files",
            );
            Vec::new()
        }
    };

    Some(Bundle::new(crc, files))
}

fn convert_crc(
    record: &Map<String, Value>,
    location: &str,
    diag: &mut NormalizeDiagnostics,
) -> Option<Crc> {
    match record.get("crc") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(Crc::Number(n.clone())),
        Some(Value::String(s)) => Some(Crc::Text(s.clone())),
        Some(_) => {
            diag.skip(format!("{location}.crc"), "CRC is neither a string nor a number");
            None
        }
    }
}

fn convert_file_entry(
    entry: &Value,
    location: &str,
    diag: &mut NormalizeDiagnostics,
) -> Option<FileEntry> {
    let Some(record) = entry.as_object() else {
        diag.skip(location, "expected a file entry object");
        return None;
    };
    let Some(asset_path) = record.get("asset_path").and_then(Value::as_str) else {
        diag.skip(location, "missing string `asset_path`");
        return None;
    };
    let Some(guid) = record.get("guid").and_then(Value::as_str) else {
        diag.skip(location, "missing string `guid`");
        return None;
    };

    let size = match record.get("size") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.clone()),
        Some(_) => {
            diag.skip(format!("{location}.size"), "size is not a number; treated as unknown");
            None
        }
    };

    Some(FileEntry {
        asset_path: asset_path.to_string(),
        guid: guid.to_string(),
        size,
    })
}
