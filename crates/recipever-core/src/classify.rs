//! Version classification: dirty and prerelease detection, final
//! rendering.
//!
//! A build is a prerelease when the package's content at HEAD diverges
//! from the trunk branch's content for that package; it is dirty when the
//! working tree has uncommitted changes under the package directory.
//! Either condition forces the `-g{short}` qualifier, because such a
//! build can never be a clean release.

use crate::error::ResolveError;
use crate::repo::RepoHandle;
use crate::walker::WalkOutcome;
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

/// How a dirty working tree affects the revision count.
///
/// The two observed packaging scripts disagree on this, so it is an
/// explicit configuration choice rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirtyPolicy {
    /// Dirty adds one on top of the walked count (default).
    #[default]
    Additive,
    /// Dirty forces the count to exactly one, discarding the walked count.
    Override,
}

impl FromStr for DirtyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "additive" => Ok(Self::Additive),
            "override" => Ok(Self::Override),
            other => Err(format!(
                "invalid dirty policy '{other}': expected 'additive' or 'override'"
            )),
        }
    }
}

impl std::fmt::Display for DirtyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Additive => write!(f, "additive"),
            Self::Override => write!(f, "override"),
        }
    }
}

/// A fully classified package version, created once per resolution and
/// never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedVersion {
    /// The declared upstream version the build is based on.
    pub base: String,
    /// Whether the package content diverges from trunk.
    pub is_prerelease: bool,
    /// Whether the working tree has uncommitted package changes.
    pub is_dirty: bool,
    /// Abbreviated id of the last meaningful commit.
    pub short_commit_id: String,
    /// Effective revision count after applying the dirty policy.
    pub revision_count: u32,
}

impl ResolvedVersion {
    /// Render the final version string.
    ///
    /// Clean release builds render as `{base}+{revision_count}`; dirty or
    /// prerelease builds as `{base}-g{short_commit_id}+{revision_count}`.
    /// The build suffix forces the package manager to pick up newer
    /// builds of the same upstream version.
    pub fn render(&self) -> String {
        if self.is_dirty || self.is_prerelease {
            format!(
                "{}-g{}+{}",
                self.base, self.short_commit_id, self.revision_count
            )
        } else {
            format!("{}+{}", self.base, self.revision_count)
        }
    }
}

impl std::fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Classify a walked package history into a [`ResolvedVersion`].
///
/// An unresolvable trunk reference does not fail the classification: a
/// build whose divergence cannot be determined is conservatively labeled
/// a prerelease rather than risk mislabeling it as a clean release.
///
/// # Errors
///
/// Returns [`ResolveError::Git`] if HEAD, the working-tree status, or an
/// object lookup fails.
pub fn classify(
    repo: &RepoHandle,
    package: &str,
    declared_version: &str,
    outcome: &WalkOutcome,
    trunk: &str,
    dirty_policy: DirtyPolicy,
) -> Result<ResolvedVersion, ResolveError> {
    let is_dirty = repo.has_local_changes(package)?;

    let head = repo.head_commit()?;
    let head_tree = head.tree()?;
    // Not taken from outcome.last_tree_id: that is None when the walk
    // stops at HEAD itself (uncommitted version bump) and an ancestor's
    // identity when HEAD no longer contains the package. Divergence is
    // defined on HEAD's own subtree.
    let head_subtree = repo.subtree(&head_tree, package).map(|t| t.id());

    let is_prerelease = match repo.trunk_commit(trunk) {
        Ok(trunk) => {
            let trunk_tree = trunk.tree()?;
            let trunk_subtree = repo.subtree(&trunk_tree, package).map(|t| t.id());
            head_subtree != trunk_subtree
        }
        Err(ResolveError::TrunkNotFound { name }) => {
            debug!(trunk = %name, "trunk not resolvable; treating build as prerelease");
            true
        }
        Err(err) => return Err(err),
    };

    let revision_count = if is_dirty {
        match dirty_policy {
            DirtyPolicy::Additive => outcome.revision_count + 1,
            DirtyPolicy::Override => 1,
        }
    } else {
        outcome.revision_count
    };

    let short_commit_id = repo.short_id(outcome.last_commit_id.unwrap_or_else(|| head.id()))?;

    Ok(ResolvedVersion {
        base: declared_version.to_string(),
        is_prerelease,
        is_dirty,
        short_commit_id,
        revision_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(is_prerelease: bool, is_dirty: bool) -> ResolvedVersion {
        ResolvedVersion {
            base: "2.9.3".to_string(),
            is_prerelease,
            is_dirty,
            short_commit_id: "abc1234".to_string(),
            revision_count: 4,
        }
    }

    #[test]
    fn test_render_clean_release() {
        assert_eq!(version(false, false).render(), "2.9.3+4");
    }

    #[test]
    fn test_render_dirty() {
        assert_eq!(version(false, true).render(), "2.9.3-gabc1234+4");
    }

    #[test]
    fn test_render_prerelease() {
        assert_eq!(version(true, false).render(), "2.9.3-gabc1234+4");
    }

    #[test]
    fn test_render_zero_revisions() {
        let mut v = version(false, false);
        v.revision_count = 0;
        assert_eq!(v.render(), "2.9.3+0");
    }

    #[test]
    fn test_display_matches_render() {
        let v = version(true, true);
        assert_eq!(v.to_string(), v.render());
    }

    #[test]
    fn test_dirty_policy_from_str() {
        assert_eq!("additive".parse(), Ok(DirtyPolicy::Additive));
        assert_eq!("override".parse(), Ok(DirtyPolicy::Override));
        assert!("flat".parse::<DirtyPolicy>().is_err());
    }
}
