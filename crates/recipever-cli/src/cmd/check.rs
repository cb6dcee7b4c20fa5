//! Check command

use anyhow::{Context, Result};
use recipever_core::RecipeManifest;
use std::path::Path;

/// Check that a package's recipe manifest is readable and report its
/// declared version.
pub fn check(repo_root: &Path, package: &str) -> Result<()> {
    let manifest = RecipeManifest::load(repo_root, package)
        .with_context(|| format!("recipe manifest check failed for '{package}'"))?;

    println!("{}: {}", manifest.name(), manifest.declared_version());
    Ok(())
}
