//! Configuration file loading and discovery.
//!
//! Settings live in an optional `.bundle-log.yaml`, found by walking a fixed
//! list of directories. Command-line flags are merged over it.

use super::defaults::{DEFAULT_BIND_ADDRESS, DEFAULT_LOG_FILE, DEFAULT_PAGE_PATH, DEFAULT_PORT};
use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

/// File names recognized in each searched directory, in preference order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".bundle-log.yaml",
    ".bundle-log.yml",
    "bundle-log.yaml",
    "bundle-log.yml",
];

/// Directories searched for a config file, most specific first: the working
/// directory, the enclosing git checkout, the user config directory, then home.
fn search_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let git_root = cwd.as_deref().and_then(enclosing_git_root);
    [
        cwd,
        git_root,
        dirs::config_dir().map(|dir| dir.join("bundle-log")),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Locate the config file to use. An explicit path wins when it exists.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    explicit_path
        .filter(|path| path.exists())
        .map(Path::to_path_buf)
        .or_else(|| search_dirs().iter().find_map(|dir| find_config_in_dir(dir)))
}

/// First recognized config file name present in `dir`.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Nearest ancestor of `start` (inclusive) holding a `.git` entry.
fn enclosing_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Default location for a user-level config file.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bundle-log").join("bundle-log.yaml"))
}

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => ConfigFileError::NotFound(path.to_path_buf()),
        _ => ConfigFileError::Io(err),
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Discovered config, or defaults when none is found. A file that fails to
/// load is logged and ignored.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    let Some(path) = discover_config_file(explicit_path) else {
        return (AppConfig::default(), None);
    };
    match load_config_file(&path) {
        Ok(config) => (config, Some(path)),
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring config file: {err}");
            (AppConfig::default(), None)
        }
    }
}

impl AppConfig {
    /// Layer `other` over `self`.
    ///
    /// A field of `other` still at its default is treated as unset, so flags
    /// the user did not pass leave file settings alone. Boolean flags can
    /// only switch a setting on.
    pub fn merge(&mut self, other: &Self) {
        fn take<T: Clone + PartialEq>(slot: &mut T, value: &T, unset: &T) {
            if value != unset {
                slot.clone_from(value);
            }
        }

        let server = &other.server;
        take(&mut self.server.bind, &server.bind, &DEFAULT_BIND_ADDRESS.to_string());
        take(&mut self.server.port, &server.port, &DEFAULT_PORT);
        take(&mut self.server.log_file, &server.log_file, &PathBuf::from(DEFAULT_LOG_FILE));
        take(&mut self.server.page_path, &server.page_path, &DEFAULT_PAGE_PATH.to_string());

        take(&mut self.output.format, &other.output.format, &ReportFormat::Auto);
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        self.output.no_color |= other.output.no_color;

        self.behavior.fail_on_change |= other.behavior.fail_on_change;
        self.behavior.quiet |= other.behavior.quiet;
    }

    /// Discovered config with `cli_overrides` merged over it.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

/// Commented YAML holding the default settings, written by `config init`.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# bundle-log configuration
# Place this file at .bundle-log.yaml in your project root or ~/.config/bundle-log/
# CLI arguments always override file settings.

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BehaviorConfig, ServerConfig};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".bundle-log.yaml");
        std::fs::write(&config_path, "server:\n  port: 9000\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_dotfile() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bundle-log.yml"), "").unwrap();
        std::fs::write(tmp.path().join(".bundle-log.yml"), "").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(tmp.path().join(".bundle-log.yml")));
    }

    #[test]
    fn test_git_root_from_nested_dir() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("Assets").join("Bundles");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(enclosing_git_root(&nested), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_explicit_path_missing_falls_through() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.yaml");
        assert_ne!(discover_config_file(Some(&missing)), Some(missing));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
server:
  port: 9100
  log_file: out/build_log.json
output:
  format: json
behavior:
  fail_on_change: true
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.log_file, PathBuf::from("out/build_log.json"));
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "server: [unclosed").unwrap();

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig {
            server: ServerConfig {
                port: 9100,
                ..ServerConfig::default()
            },
            ..AppConfig::default()
        };
        let override_config = AppConfig {
            output: crate::config::OutputConfig {
                format: ReportFormat::Html,
                ..Default::default()
            },
            behavior: BehaviorConfig {
                quiet: true,
                ..Default::default()
            },
            ..AppConfig::default()
        };

        base.merge(&override_config);

        assert_eq!(base.server.port, 9100, "unset CLI port keeps file port");
        assert_eq!(base.output.format, ReportFormat::Html);
        assert!(base.behavior.quiet);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("server:"));
        assert!(example.contains("page_path: /viewer.html"));

        let body: String = example
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: AppConfig = serde_yaml::from_str(&body).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "server:\n  port: 9000").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
