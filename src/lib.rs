//! **Inspect and compare asset-bundle build logs.**
//!
//! A build pipeline that packs game assets into content-addressed bundles
//! writes a JSON build log recording which bundles each asset went into and
//! which files each bundle holds. `bundle-log-tools` turns such a log into a
//! canonical, typed [`Snapshot`], answers lookups over it, and computes what
//! changed between two builds.
//!
//! Two generations of the producing tool wrote the `assets` section in
//! different layouts (a list of `{first, second}` pairs, or a plain object).
//! Both normalize to the same snapshot.
//!
//! ## Core Concepts & Modules
//!
//! - **[`parsers`]**: Shape detection and normalization of the raw log into a
//!   [`Snapshot`], with diagnostics for skipped records.
//! - **[`model`]**: The [`Snapshot`] itself and the [`DependencyIndex`] query
//!   surface (bundle counts per asset, GUIDs per asset/bundle pair, reverse
//!   asset lookups, search and sorting).
//! - **[`diff`]**: The [`DiffEngine`] producing a [`ChangeReport`] of added and
//!   removed assets and added, removed and modified bundles.
//! - **[`reports`]**: JSON, summary, table and HTML renderings of diffs and views.
//! - **[`pipeline`]**: Parse, diff and output stages used by the command handlers.
//! - **[`server`]**: The local viewer server (axum).
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use bundle_log_tools::{parse_log, DependencyIndex};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snapshot = parse_log(Path::new("build_log.json"))?;
//!     let index = DependencyIndex::build(&snapshot);
//!
//!     for row in index.asset_rows(Some("ui/"), Default::default(), Default::default()) {
//!         println!("{} -> {} bundles", row.path, row.bundle_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Comparing Two Builds
//!
//! ```no_run
//! use std::path::Path;
//! use bundle_log_tools::{diff, parse_log};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let previous = parse_log(Path::new("previous/build_log.json"))?;
//!     let current = parse_log(Path::new("build_log.json"))?;
//!
//!     let report = diff(&current, &previous);
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `bundle-log` binary wraps this library with `serve`, `view` and
//! `diff` subcommands; see the project's README.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Doc completeness: # Errors / # Panics sections are not written per fn
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Report writers are long sequences of writeln! calls
    clippy::too_many_lines,
    // Config structs legitimately use several bools for flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    // self is kept for API consistency across reporter impls
    clippy::unused_self,
    // `current`/`previous` and `added`/`removed` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod server;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig, ServerConfig};
pub use config::{ConfigError, Validatable};
pub use config::{DiffConfig, ServeConfig, ViewConfig, ViewTarget};
pub use diff::{diff, BundleChange, ChangeReport, ChangeStatus, DiffEngine, DiffSummary};
pub use error::{BundleLogError, ErrorContext, Result};
pub use model::{
    AssetBundles, AssetRow, AssetSortKey, Bundle, Crc, DependencyIndex, FileEntry, Snapshot,
    SnapshotBuilder, SortDirection,
};
pub use parsers::{
    normalize, normalize_with_diagnostics, parse_log, parse_log_str, AssetShape,
    NormalizeDiagnostics, ParseError,
};
pub use reports::{ReportFormat, ReportGenerator};
