//! Entry points: resolve a recipe version or fall back to declared
//! metadata.
//!
//! `resolve` is the strict form with the full error taxonomy;
//! `resolve_or_fallback` is what packaging recipes call. Version
//! computation failure must never block a build, so every recoverable
//! failure collapses to `None` and the caller substitutes its statically
//! declared version.

use crate::cache::{CACHE_FILE, VersionCache};
use crate::classify::{self, DirtyPolicy, ResolvedVersion};
use crate::error::ResolveError;
use crate::manifest::RecipeManifest;
use crate::repo::RepoHandle;
use crate::walker;
use std::path::Path;
use tracing::debug;

/// Knobs for one resolution call.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// The trunk branch divergence is measured against.
    pub trunk: String,
    /// How a dirty working tree affects the revision count.
    pub dirty_policy: DirtyPolicy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            trunk: "main".to_string(),
            dirty_policy: DirtyPolicy::default(),
        }
    }
}

/// Resolve the version of `package` from the repository at `repo_root`.
///
/// # Errors
///
/// Returns a [`ResolveError`] for every condition in the error taxonomy:
/// missing or unreadable manifest, missing repository, or any underlying
/// repository failure. All of them are recoverable by falling back to
/// statically declared metadata; see [`resolve_or_fallback`].
pub fn resolve(
    repo_root: &Path,
    package: &str,
    options: &ResolveOptions,
) -> Result<ResolvedVersion, ResolveError> {
    let manifest = RecipeManifest::load(repo_root, package)?;
    resolve_with_manifest(repo_root, &manifest, options)
}

fn resolve_with_manifest(
    repo_root: &Path,
    manifest: &RecipeManifest,
    options: &ResolveOptions,
) -> Result<ResolvedVersion, ResolveError> {
    let repo = RepoHandle::open(repo_root)?;
    let outcome = walker::walk(&repo, manifest.name(), manifest.declared_version())?;
    classify::classify(
        &repo,
        manifest.name(),
        manifest.declared_version(),
        &outcome,
        &options.trunk,
        options.dirty_policy,
    )
}

/// Resolve the version of `package`, falling back to `None` when
/// resolution is not possible.
///
/// `None` means "use the statically declared version". Outside a
/// repository, a previously emitted [`VersionCache`] substitutes for the
/// walk as long as it still matches the declared upstream version.
pub fn resolve_or_fallback(
    repo_root: &Path,
    package: &str,
    options: &ResolveOptions,
) -> Option<String> {
    let manifest = match RecipeManifest::load(repo_root, package) {
        Ok(manifest) => manifest,
        Err(err) => {
            debug!(%package, "no usable recipe manifest: {err}");
            return None;
        }
    };

    match resolve_with_manifest(repo_root, &manifest, options) {
        Ok(resolved) => Some(resolved.render()),
        Err(ResolveError::NoRepository { .. }) => cached_version(repo_root, &manifest),
        Err(err) => {
            debug!(%package, "version resolution failed: {err}");
            None
        }
    }
}

/// Consult the per-package version cache when no repository is present.
fn cached_version(repo_root: &Path, manifest: &RecipeManifest) -> Option<String> {
    let path = repo_root.join(manifest.name()).join(CACHE_FILE);
    let cache = VersionCache::load(&path)?;
    if cache.package_version == manifest.declared_version() {
        debug!(package = manifest.name(), "using cached recipe version");
        Some(cache.recipe_version)
    } else {
        debug!(
            package = manifest.name(),
            cached = %cache.package_version,
            declared = manifest.declared_version(),
            "stale version cache ignored"
        );
        None
    }
}
