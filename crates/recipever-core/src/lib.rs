//! recipever - recipe version resolution from Git history.
//!
//! Computes a deterministic package version string for monorepo build
//! recipes without a central version registry. The build component is the
//! number of distinct changes to the recipe folder since a new upstream
//! version was packaged; a `-g{commit}` qualifier marks builds whose
//! recipe content diverges from trunk or carries uncommitted changes.
//!
//! # Architecture
//!
//! - **History Walker** ([`walker`]): topological walk of HEAD's
//!   ancestry, bounded by the last upstream version bump, counting
//!   distinct recipe subtree identities.
//! - **Version Classifier** ([`classify`]): dirty and prerelease
//!   detection plus final string rendering.
//! - **Fallback Provider** ([`resolver`]): the public entry points;
//!   degrades to the `version.yml` cache ([`cache`]) and ultimately to
//!   `None` when no history is available.
//!
//! # Version shapes
//!
//! ```text
//! 2.9.3+4            clean release build (4 recipe revisions)
//! 2.9.3-gabc1234+4   prerelease or locally modified build
//! ```
//!
//! Resolution is synchronous, single-threaded, and performs no network
//! I/O; the repository handle lives for exactly one call.

pub mod cache;
pub mod classify;
pub mod error;
pub mod manifest;
pub mod repo;
pub mod resolver;
pub mod walker;

pub use cache::VersionCache;
pub use classify::{DirtyPolicy, ResolvedVersion};
pub use error::ResolveError;
pub use manifest::RecipeManifest;
pub use repo::RepoHandle;
pub use resolver::{ResolveOptions, resolve, resolve_or_fallback};
pub use walker::WalkOutcome;
