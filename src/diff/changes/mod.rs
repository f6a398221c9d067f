//! Change computer implementations.
//!
//! This module provides concrete implementations of the `ChangeComputer` trait
//! for the two sections of a build log: assets and bundles.

mod assets;
mod bundles;

pub use assets::AssetChangeComputer;
pub use bundles::{files_equal, BundleChangeComputer};
