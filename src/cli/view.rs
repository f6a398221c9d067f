//! View command handler.
//!
//! Implements the `view` subcommand for inspecting a single build log.

use crate::config::ViewConfig;
use crate::pipeline::{output_view, parse_log_with_context};
use anyhow::Result;

/// Run the view command
#[allow(clippy::needless_pass_by_value)]
pub fn run_view(config: ViewConfig) -> Result<()> {
    let parsed = parse_log_with_context(&config.log_path, config.behavior.quiet)?;
    output_view(&config, parsed.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BehaviorConfig, OutputConfig, ViewTarget};
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    const LOG: &str = r#"{
        "assets": {"Assets/a.png": {"b1": ["g1"]}},
        "bundles": {"b1": {"crc": 7, "files": [{"asset_path": "Assets/a.png", "guid": "g1"}]}}
    }"#;

    fn view_config(tmp: &TempDir, target: ViewTarget) -> ViewConfig {
        ViewConfig {
            log_path: tmp.path().join("build_log.json"),
            target,
            output: OutputConfig {
                format: ReportFormat::Json,
                file: Some(tmp.path().join("view.json")),
                no_color: true,
            },
            behavior: BehaviorConfig {
                fail_on_change: false,
                quiet: true,
            },
        }
    }

    #[test]
    fn test_view_bundle_writes_json() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("build_log.json"), LOG).unwrap();

        run_view(view_config(&tmp, ViewTarget::Bundle("b1".to_string()))).unwrap();

        let written = std::fs::read_to_string(tmp.path().join("view.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["view"], "bundle");
        assert_eq!(json["bundle"]["files"][0]["guid"], "g1");
    }

    #[test]
    fn test_view_missing_log_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(run_view(view_config(&tmp, ViewTarget::default())).is_err());
    }
}
