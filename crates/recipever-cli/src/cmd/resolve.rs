//! Resolve command

use anyhow::{Context, Result};
use recipever_core::{DirtyPolicy, RecipeManifest, ResolveOptions};
use std::path::Path;
use tracing::warn;

/// Resolve and print the version of a package.
///
/// Prints the resolved version string, or the statically declared version
/// (with a warning) when resolution falls back.
pub fn resolve(
    repo_root: &Path,
    package: &str,
    trunk: String,
    dirty_policy: DirtyPolicy,
    json: bool,
) -> Result<()> {
    let options = ResolveOptions {
        trunk,
        dirty_policy,
    };

    match recipever_core::resolve(repo_root, package, &options) {
        Ok(resolved) => {
            if json {
                let payload = serde_json::json!({
                    "package": package,
                    "version": resolved.render(),
                    "base": resolved.base,
                    "is_prerelease": resolved.is_prerelease,
                    "is_dirty": resolved.is_dirty,
                    "short_commit_id": resolved.short_commit_id,
                    "revision_count": resolved.revision_count,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{resolved}");
            }
            Ok(())
        }
        Err(err) => {
            warn!(%package, "version resolution fell back: {err}");
            // Degrade exactly like library callers: version.yml cache
            // first, then the statically declared version.
            let manifest = RecipeManifest::load(repo_root, package)
                .with_context(|| format!("package '{package}' has no readable recipe manifest"))?;
            let version = recipever_core::resolve_or_fallback(repo_root, package, &options)
                .unwrap_or_else(|| manifest.declared_version().to_string());
            if json {
                let payload = serde_json::json!({
                    "package": package,
                    "version": version,
                    "fallback": true,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{version}");
            }
            Ok(())
        }
    }
}
