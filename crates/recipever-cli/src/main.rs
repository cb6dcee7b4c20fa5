//! recipever CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use recipever_cli::{Cli, Commands, cmd};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let repo_root = cli.repo_root;

    match cli.command {
        Commands::Resolve {
            package,
            trunk,
            dirty_policy,
            json,
        } => cmd::resolve::resolve(&repo_root, &package, trunk, dirty_policy, json),
        Commands::Emit {
            package,
            trunk,
            dirty_policy,
        } => cmd::emit::emit(&repo_root, &package, trunk, dirty_policy),
        Commands::Check { package } => cmd::check::check(&repo_root, &package),
    }
}
