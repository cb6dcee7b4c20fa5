//! History walker: counts distinct recipe states since the last upstream
//! version bump.
//!
//! Walking backward from HEAD in topological order, each commit whose
//! package subtree differs from the previously recorded one counts as one
//! recipe revision. The walk stops the moment an ancestor records a
//! different declared version -- everything older belongs to a previous
//! upstream release and is never visited.

use crate::error::ResolveError;
use crate::repo::RepoHandle;
use git2::Oid;
use tracing::debug;

/// Result of one history walk for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Number of distinct packaging-affecting changes since the declared
    /// version last changed. Zero is valid and renders as `+0`.
    pub revision_count: u32,
    /// The last commit visited, including the boundary commit the walk
    /// stopped on. `None` only if the walk never ran.
    pub last_commit_id: Option<Oid>,
    /// Identity of the most recent counted recipe subtree.
    pub last_tree_id: Option<Oid>,
}

/// Walk HEAD's ancestry and count recipe revisions for `package` under
/// `declared_version`.
///
/// Commits whose tree has no subtree for the package are skipped without
/// affecting the count. A commit whose recorded declared version differs
/// from `declared_version` (including "no manifest" and "unreadable
/// manifest") terminates the walk before being counted. Consecutive
/// commits reproducing an identical subtree (merges, unrelated-path
/// changes) do not inflate the count.
///
/// # Errors
///
/// Returns [`ResolveError::Git`] if the revision walk cannot be started
/// or an ancestor commit is unreadable.
pub fn walk(
    repo: &RepoHandle,
    package: &str,
    declared_version: &str,
) -> Result<WalkOutcome, ResolveError> {
    let mut revision_count = 0u32;
    let mut last_commit_id = None;
    let mut last_tree_id: Option<Oid> = None;

    for id in repo.ancestors_of_head()? {
        let id = id?;
        let commit = repo.find_commit(id)?;
        last_commit_id = Some(id);

        let tree = commit.tree()?;
        let Some(subtree) = repo.subtree(&tree, package) else {
            continue;
        };

        let recorded = repo.recorded_declared_version(&subtree);
        if recorded.as_deref() != Some(declared_version) {
            debug!(
                commit = %id,
                recorded = recorded.as_deref().unwrap_or("<none>"),
                "reached upstream version boundary"
            );
            break;
        }

        if last_tree_id != Some(subtree.id()) {
            revision_count += 1;
            last_tree_id = Some(subtree.id());
            debug!(commit = %id, revision = revision_count, "recipe changed");
        }
    }

    Ok(WalkOutcome {
        revision_count,
        last_commit_id,
        last_tree_id,
    })
}
