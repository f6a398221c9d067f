//! Change detection between two build log snapshots.
//!
//! # Architecture
//!
//! - [`ChangeComputer`](traits::ChangeComputer): trait for computing one category of change
//! - Individual change computers in the [`changes`] module
//! - [`DiffEngine`] assembles both into a [`ChangeReport`]
//!
//! # Example
//!
//! ```ignore
//! use bundle_log_tools::diff::DiffEngine;
//!
//! let report = DiffEngine::new().diff(&current, &previous);
//! for (hash, change) in &report.bundle_changes {
//!     println!("{} {hash}", change.status().symbol());
//! }
//! ```

pub mod changes;
mod engine;
mod result;
pub mod traits;

pub use engine::{diff, DiffEngine};
pub use result::{BundleChange, ChangeReport, ChangeStatus, DiffSummary};
pub use traits::{AssetChangeSet, BundleChangeSet, ChangeComputer};
