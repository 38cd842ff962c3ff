//! vendr - vendor remote modules into a local workspace

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vendr_cli::cmd;
use vendr_cli::{Cli, Commands};
use vendr_core::paths::try_workspace_root;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dry_run = cli.dry_run;
    let root = cli
        .root
        .or_else(try_workspace_root)
        .context("Could not determine the workspace root. Pass --root or set VENDR_ROOT.")?;
    tracing::debug!("Workspace root: {}", root.display());

    match cli.command {
        Commands::Add { modules } => cmd::module::add(&root, &modules, dry_run).await,
        Commands::Remove { modules } => cmd::module::remove(&root, &modules, dry_run).await,
        Commands::Update { modules } => cmd::module::update(&root, &modules, dry_run).await,
        Commands::Link { links } => cmd::link::link(&root, &links, dry_run).await,
        Commands::Unlink { links } => cmd::link::unlink(&root, &links, dry_run).await,
        Commands::Alias { alias, target } => {
            cmd::alias::alias(&root, &alias, &target, dry_run).await
        }
        Commands::Unalias { aliases } => cmd::alias::unalias(&root, &aliases, dry_run).await,
        Commands::Apply { file } => cmd::apply::apply(&root, &file, dry_run).await,
        Commands::List { json } => cmd::list::list(&root, json).await,
    }
}
