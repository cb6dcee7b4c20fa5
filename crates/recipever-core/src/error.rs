//! Error taxonomy for version resolution.
//!
//! Every variant is recoverable: version computation is a best-effort
//! enhancement of statically declared metadata, never a hard build
//! dependency. [`crate::resolve_or_fallback`] collapses all of these to
//! `None`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a recipe version.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The package has no `conandata.yml` manifest in the working tree.
    #[error("no recipe manifest at {path}")]
    MissingManifest {
        /// Path where the manifest was expected.
        path: PathBuf,
    },

    /// The manifest exists but no declared version could be extracted
    /// from its `sources:` mapping.
    #[error("recipe manifest at {path} has no declared version")]
    ManifestUnreadable {
        /// Path of the offending manifest.
        path: PathBuf,
    },

    /// No version-control metadata at the repository root (extracted
    /// source archive, installed package).
    #[error("no git repository at {path}")]
    NoRepository {
        /// Repository root that was probed.
        path: PathBuf,
    },

    /// The trunk branch could not be resolved to a commit. Handled
    /// inside classification (treated as prerelease) and never surfaced
    /// from the public entry points.
    #[error("trunk branch '{name}' not found")]
    TrunkNotFound {
        /// Name of the trunk reference that failed to resolve.
        name: String,
    },

    /// An underlying libgit2 failure (corrupt repository, unborn HEAD).
    #[error("repository error: {0}")]
    Git(#[from] git2::Error),

    /// Filesystem failure while reading the working-tree manifest.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
