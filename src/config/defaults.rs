//! Default values for bundle-log configuration.

/// Port the viewer server listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8000;

/// Address the viewer server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Primary log file served by the viewer.
pub const DEFAULT_LOG_FILE: &str = "build_log.json";

/// Route of the interactive viewer page.
pub const DEFAULT_PAGE_PATH: &str = "/viewer.html";
