//! Repository access for version resolution.
//!
//! [`RepoHandle`] is the only place that touches `git2` directly; the
//! walker and classifier go through it. A handle is opened at the start
//! of one resolution call and dropped when the resolved version (or
//! fallback) is obtained -- there is no ambient, process-global handle.

use crate::error::ResolveError;
use crate::manifest::{self, MANIFEST_FILE};
use git2::{BranchType, Commit, ObjectType, Oid, Repository, Revwalk, Sort, StatusOptions, Tree};
use std::path::Path;

/// Handle to the version-control repository rooted one level above each
/// package directory.
pub struct RepoHandle {
    inner: Repository,
}

impl std::fmt::Debug for RepoHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoHandle")
            .field("path", &self.inner.path())
            .finish()
    }
}

impl RepoHandle {
    /// Open the repository at `root`.
    ///
    /// The presence of `.git` is checked before any repository I/O so
    /// that building from an extracted source archive stays a pure
    /// filesystem probe.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoRepository`] if `root` has no `.git`
    /// entry, or [`ResolveError::Git`] if libgit2 rejects the repository.
    pub fn open(root: &Path) -> Result<Self, ResolveError> {
        if !root.join(".git").exists() {
            return Err(ResolveError::NoRepository {
                path: root.to_path_buf(),
            });
        }
        Ok(Self {
            inner: Repository::open(root)?,
        })
    }

    /// The commit HEAD currently points at.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Git`] for an unborn or detached-broken HEAD.
    pub fn head_commit(&self) -> Result<Commit<'_>, ResolveError> {
        Ok(self.inner.head()?.peel_to_commit()?)
    }

    /// Resolve the trunk branch (`main` by convention) to its tip commit.
    ///
    /// Tries a local branch first, then a general revspec so that remote
    /// refs like `origin/main` also work on detached CI checkouts.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::TrunkNotFound`] when neither lookup
    /// resolves to a commit.
    pub fn trunk_commit(&self, trunk: &str) -> Result<Commit<'_>, ResolveError> {
        if let Ok(branch) = self.inner.find_branch(trunk, BranchType::Local) {
            return Ok(branch.into_reference().peel_to_commit()?);
        }
        self.inner
            .revparse_single(trunk)
            .ok()
            .and_then(|object| object.peel(ObjectType::Commit).ok())
            .and_then(|object| object.into_commit().ok())
            .ok_or_else(|| ResolveError::TrunkNotFound {
                name: trunk.to_string(),
            })
    }

    /// An iterator over all ancestors of HEAD in topological order
    /// (descendants before ancestors).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Git`] if HEAD cannot be pushed onto the
    /// walk (empty repository).
    pub fn ancestors_of_head(&self) -> Result<Revwalk<'_>, ResolveError> {
        let mut walk = self.inner.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL)?;
        walk.push_head()?;
        Ok(walk)
    }

    /// Look up a commit by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Git`] if the object is missing or not a
    /// commit.
    pub fn find_commit(&self, id: Oid) -> Result<Commit<'_>, ResolveError> {
        Ok(self.inner.find_commit(id)?)
    }

    /// The package's subtree within `tree`, or `None` when the package
    /// does not exist at that snapshot (or the name resolves to a blob).
    pub fn subtree<'r>(&'r self, tree: &Tree<'r>, package: &str) -> Option<Tree<'r>> {
        let entry = tree.get_name(package)?;
        if entry.kind() != Some(ObjectType::Tree) {
            return None;
        }
        entry.to_object(&self.inner).ok()?.into_tree().ok()
    }

    /// The declared version recorded in a historical package subtree.
    ///
    /// `None` covers every boundary condition the walk must stop on: no
    /// manifest in the subtree, an unreadable blob, non-UTF-8 content,
    /// or YAML that yields no declared version.
    pub fn recorded_declared_version(&self, subtree: &Tree<'_>) -> Option<String> {
        let entry = subtree.get_name(MANIFEST_FILE)?;
        let blob = self.inner.find_blob(entry.id()).ok()?;
        let content = std::str::from_utf8(blob.content()).ok()?;
        manifest::declared_version_from_str(content)
    }

    /// Whether the working tree has uncommitted changes under the
    /// package directory (modified, added, removed, or untracked paths).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Git`] if the status listing fails (bare
    /// repository).
    pub fn has_local_changes(&self, package: &str) -> Result<bool, ResolveError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.inner.statuses(Some(&mut opts))?;

        // Separator-aware prefix match: `foo` must not claim `foo-bar/x`.
        let prefix = format!("{package}/");
        Ok(statuses
            .iter()
            .any(|entry| entry.path().is_some_and(|p| p == package || p.starts_with(&prefix))))
    }

    /// Abbreviated, collision-resistant form of an object id (libgit2's
    /// minimum-unique short id, at least 7 hex characters).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Git`] if the object cannot be found.
    pub fn short_id(&self, id: Oid) -> Result<String, ResolveError> {
        let object = self.inner.find_object(id, None)?;
        let buf = object.short_id()?;
        Ok(buf.as_str().unwrap_or_default().to_string())
    }
}
