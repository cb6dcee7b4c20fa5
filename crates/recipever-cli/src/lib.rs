//! recipever - package version resolution for monorepo build recipes.
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Computes `{base}+{build}` / `{base}-g{commit}+{build}` version strings
//! for package recipes from Git history, and falls back to statically
//! declared metadata when no history is available.

pub mod cmd;

use clap::{Parser, Subcommand};
use recipever_core::DirtyPolicy;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "recipever")]
#[command(author, version, about = "Package version resolution for monorepo build recipes")]
pub struct Cli {
    /// Root of the recipe repository (one level above each package directory)
    #[arg(long, global = true, default_value = ".")]
    pub repo_root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve and print the version of a package
    Resolve {
        /// Package name (its directory name in the repository)
        package: String,
        /// Trunk branch divergence is measured against
        #[arg(long, default_value = "main")]
        trunk: String,
        /// How a dirty working tree affects the revision count
        #[arg(long, default_value = "additive")]
        dirty_policy: DirtyPolicy,
        /// Emit the full resolution as JSON instead of the bare version
        #[arg(long)]
        json: bool,
    },
    /// Resolve a package version and write its version.yml cache
    Emit {
        /// Package name (its directory name in the repository)
        package: String,
        /// Trunk branch divergence is measured against
        #[arg(long, default_value = "main")]
        trunk: String,
        /// How a dirty working tree affects the revision count
        #[arg(long, default_value = "additive")]
        dirty_policy: DirtyPolicy,
    },
    /// Check that a package's recipe manifest is readable
    Check {
        /// Package name (its directory name in the repository)
        package: String,
    },
}
