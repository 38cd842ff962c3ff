//! Link and unlink commands

use anyhow::Result;
use std::path::Path;
use vendr_core::Action;

/// Link module files into the vendor directory
pub async fn link(root: &Path, links: &[String], dry_run: bool) -> Result<()> {
    let actions: Vec<Action> = links
        .iter()
        .map(|link| Action::AddLink { link: link.clone() })
        .collect();
    super::run_batch(root, &actions, dry_run).await?;
    Ok(())
}

/// Remove linked files
pub async fn unlink(root: &Path, links: &[String], dry_run: bool) -> Result<()> {
    let actions: Vec<Action> = links
        .iter()
        .map(|link| Action::RemoveLink { link: link.clone() })
        .collect();
    super::run_batch(root, &actions, dry_run).await?;
    Ok(())
}
