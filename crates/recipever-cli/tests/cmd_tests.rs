//! Tests for the subcommand implementations.

use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};
use recipever_cli::cmd;
use recipever_core::{DirtyPolicy, VersionCache, cache::CACHE_FILE};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PKG: &str = "gnustep-base";

fn write_manifest(root: &Path, package: &str, version: &str) {
    let dir = root.join(package);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("conandata.yml"),
        format!("sources:\n  \"{version}\":\n    url: \"https://example.com/{package}-{version}.tar.gz\"\n"),
    )
    .unwrap();
}

fn init_repo_with_recipe(dir: &TempDir, version: &str) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).unwrap();
    write_manifest(dir.path(), PKG, version);

    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Recipe Tester", "tester@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "add recipe", &tree, &[])
        .unwrap();
    drop(tree);
    repo
}

#[test]
fn test_check_reports_readable_manifest() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), PKG, "1.31.1");
    assert!(cmd::check::check(dir.path(), PKG).is_ok());
}

#[test]
fn test_check_fails_without_manifest() {
    let dir = TempDir::new().unwrap();
    assert!(cmd::check::check(dir.path(), PKG).is_err());
}

#[test]
fn test_resolve_succeeds_in_a_repository() {
    let dir = TempDir::new().unwrap();
    let _repo = init_repo_with_recipe(&dir, "1.31.1");
    let result = cmd::resolve::resolve(
        dir.path(),
        PKG,
        "main".to_string(),
        DirtyPolicy::Additive,
        true,
    );
    assert!(result.is_ok());
}

#[test]
fn test_resolve_falls_back_without_repository() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), PKG, "1.31.1");
    let result = cmd::resolve::resolve(
        dir.path(),
        PKG,
        "main".to_string(),
        DirtyPolicy::Additive,
        false,
    );
    assert!(result.is_ok());
}

#[test]
fn test_resolve_fails_without_manifest() {
    let dir = TempDir::new().unwrap();
    let result = cmd::resolve::resolve(
        dir.path(),
        PKG,
        "main".to_string(),
        DirtyPolicy::Additive,
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_emit_writes_version_cache() {
    let dir = TempDir::new().unwrap();
    let _repo = init_repo_with_recipe(&dir, "1.31.1");

    cmd::emit::emit(dir.path(), PKG, "main".to_string(), DirtyPolicy::Additive).unwrap();

    let cache = VersionCache::load(&dir.path().join(PKG).join(CACHE_FILE)).unwrap();
    assert_eq!(cache.package_version, "1.31.1");
    assert_eq!(cache.recipe_version, "1.31.1+1");
}

#[test]
fn test_emit_requires_a_repository() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), PKG, "1.31.1");
    let result = cmd::emit::emit(dir.path(), PKG, "main".to_string(), DirtyPolicy::Additive);
    assert!(result.is_err());
}
