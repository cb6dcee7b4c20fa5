//! Cached version data (`version.yml`) for builds outside a repository.
//!
//! After a successful resolution the diagnostics are saved next to the
//! recipe. When a package is later built from an extracted archive or an
//! installed copy -- no `.git` anywhere -- the cached recipe version
//! substitutes for the history walk, provided it still matches the
//! declared upstream version.

use crate::classify::ResolvedVersion;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the per-package version cache.
pub const CACHE_FILE: &str = "version.yml";

/// Version and diagnostics data saved in the package directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCache {
    /// The declared upstream version the cache was computed for.
    pub package_version: String,
    /// The fully rendered recipe version string.
    pub recipe_version: String,
    /// Abbreviated id of the recipe's last meaningful commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
}

impl VersionCache {
    /// Build cache contents from a freshly resolved version.
    pub fn from_resolved(resolved: &ResolvedVersion) -> Self {
        Self {
            package_version: resolved.base.clone(),
            recipe_version: resolved.render(),
            last_commit: Some(resolved.short_commit_id.clone()),
        }
    }

    /// Load a cache file, returning `None` when it is missing or
    /// unreadable. A stale or corrupt cache is never an error; it simply
    /// fails to substitute.
    pub fn load(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Persist the cache atomically (write to a temporary sibling, then
    /// rename) so a concurrent reader never observes a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, writing, or the rename fails.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        let temp_path = path.with_extension("yml.tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE);

        let cache = VersionCache {
            package_version: "1.31.1".to_string(),
            recipe_version: "1.31.1+3".to_string(),
            last_commit: Some("abc1234".to_string()),
        };
        cache.save(&path).unwrap();

        assert_eq!(VersionCache::load(&path), Some(cache));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(VersionCache::load(&dir.path().join(CACHE_FILE)), None);
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE);
        std::fs::write(&path, ": [ not yaml").unwrap();
        assert_eq!(VersionCache::load(&path), None);
    }
}
