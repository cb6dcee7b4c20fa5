//! Emit command

use anyhow::{Context, Result};
use recipever_core::cache::CACHE_FILE;
use recipever_core::{DirtyPolicy, ResolveOptions, VersionCache};
use std::path::Path;
use tracing::info;

/// Resolve a package version and write its `version.yml` cache.
///
/// Unlike `resolve`, this requires a successful resolution: the cache
/// exists precisely so that later builds WITHOUT a repository can reuse
/// the computed data, so emitting from a degraded state would be
/// self-defeating.
pub fn emit(
    repo_root: &Path,
    package: &str,
    trunk: String,
    dirty_policy: DirtyPolicy,
) -> Result<()> {
    let options = ResolveOptions {
        trunk,
        dirty_policy,
    };

    let resolved = recipever_core::resolve(repo_root, package, &options)
        .with_context(|| format!("cannot resolve a version for package '{package}'"))?;

    let path = repo_root.join(package).join(CACHE_FILE);
    VersionCache::from_resolved(&resolved)
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(%package, version = %resolved, "wrote version cache");
    println!("{resolved}");
    Ok(())
}
