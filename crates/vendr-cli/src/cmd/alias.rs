//! Alias and unalias commands

use anyhow::Result;
use std::path::Path;
use vendr_core::Action;

/// Create a local alias for a module file
pub async fn alias(root: &Path, alias: &str, target: &str, dry_run: bool) -> Result<()> {
    let actions = [Action::AddAlias {
        alias: alias.to_string(),
        target: target.to_string(),
    }];
    super::run_batch(root, &actions, dry_run).await?;
    Ok(())
}

/// Delete local aliases
pub async fn unalias(root: &Path, aliases: &[String], dry_run: bool) -> Result<()> {
    let actions: Vec<Action> = aliases
        .iter()
        .map(|alias| Action::RemoveAlias {
            alias: alias.clone(),
        })
        .collect();
    super::run_batch(root, &actions, dry_run).await?;
    Ok(())
}
