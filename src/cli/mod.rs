//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod diff;
mod serve;
mod view;

pub use diff::run_diff;
pub use serve::run_serve;
pub use view::run_view;

// Re-export config types used by handlers
pub use crate::config::{DiffConfig, ServeConfig, ViewConfig};
