//! Recipe manifest (`conandata.yml`) loading.
//!
//! A recipe manifest maps upstream source identifiers to download
//! metadata. Its `sources:` section is an ordered mapping whose FIRST key
//! is the declared upstream version; everything else in the document is
//! irrelevant to version resolution.

use crate::error::ResolveError;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// File name of the per-package recipe manifest.
pub const MANIFEST_FILE: &str = "conandata.yml";

/// A package's identity as read from its own manifest.
///
/// Immutable once loaded; one instance lives for the duration of a single
/// resolution call.
#[derive(Debug, Clone)]
pub struct RecipeManifest {
    name: String,
    declared_version: String,
}

impl RecipeManifest {
    /// Load the manifest for `package` from `<repo_root>/<package>/conandata.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingManifest`] if the file does not
    /// exist, [`ResolveError::Io`] if it cannot be read, and
    /// [`ResolveError::ManifestUnreadable`] if no declared version can be
    /// extracted from it.
    pub fn load(repo_root: &Path, package: &str) -> Result<Self, ResolveError> {
        let path = manifest_path(repo_root, package);
        if !path.exists() {
            return Err(ResolveError::MissingManifest { path });
        }

        let content = std::fs::read_to_string(&path)?;
        let declared_version = declared_version_from_str(&content)
            .ok_or(ResolveError::ManifestUnreadable { path })?;

        Ok(Self {
            name: package.to_string(),
            declared_version,
        })
    }

    /// The package name (also the recipe's directory name in the repository).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared upstream version: the first key of the `sources:` mapping.
    pub fn declared_version(&self) -> &str {
        &self.declared_version
    }
}

/// Path of a package's manifest inside the repository working tree.
pub fn manifest_path(repo_root: &Path, package: &str) -> PathBuf {
    repo_root.join(package).join(MANIFEST_FILE)
}

/// Extract the declared version from raw manifest text.
///
/// Returns `None` when the text is not valid YAML, has no `sources:`
/// mapping, or the mapping is empty. The walker uses this on historical
/// blobs, where `None` terminates the walk (an unreadable boundary is
/// treated the same as a different declared version).
pub fn declared_version_from_str(content: &str) -> Option<String> {
    let doc: Value = serde_yaml::from_str(content).ok()?;
    let sources = doc.get("sources")?.as_mapping()?;
    let (key, _) = sources.iter().next()?;
    scalar_to_string(key)
}

/// Render a YAML scalar key as a version string.
///
/// Version-shaped keys usually parse as strings, but a two-component
/// version like `1.2` parses as a float and `1` as an integer.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_source_key_is_declared_version() {
        let content = "sources:\n  \"2.9.3\":\n    url: \"https://example.com/a.tar.gz\"\n  \"2.9.2\":\n    url: \"https://example.com/b.tar.gz\"\n";
        assert_eq!(declared_version_from_str(content).as_deref(), Some("2.9.3"));
    }

    #[test]
    fn test_unquoted_three_component_key_parses_as_string() {
        let content = "sources:\n  1.31.1:\n    url: \"https://example.com/a.tar.gz\"\n";
        assert_eq!(declared_version_from_str(content).as_deref(), Some("1.31.1"));
    }

    #[test]
    fn test_missing_sources_section() {
        assert_eq!(declared_version_from_str("patches: []\n"), None);
    }

    #[test]
    fn test_empty_sources_mapping() {
        assert_eq!(declared_version_from_str("sources: {}\n"), None);
    }

    #[test]
    fn test_invalid_yaml() {
        assert_eq!(declared_version_from_str(": not yaml ["), None);
    }
}
