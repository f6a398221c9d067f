//! Canonical in-memory representation of a build log.
//!
//! Both historical `build_log.json` shapes are normalized to these structures
//! before any query or comparison runs.
//!
//! # Index Support
//!
//! Use [`DependencyIndex`] for the asset/bundle lookups the viewer needs:
//!
//! ```ignore
//! let snapshot = parse_log(&path)?;
//! let index = DependencyIndex::build(&snapshot);
//!
//! // O(1) reverse lookup instead of scanning every bundle
//! let bundles = index.bundles_referencing_asset("Assets/Hero.prefab");
//! ```

mod index;
mod snapshot;

pub use index::*;
pub use snapshot::*;
