//! Add, remove and update commands

use anyhow::Result;
use std::path::Path;
use vendr_core::{Action, Module};
use vendr_schema::parse_identity;

/// Track one or more remote modules
pub async fn add(root: &Path, specs: &[String], dry_run: bool) -> Result<()> {
    let actions = specs
        .iter()
        .map(|spec| Module::parse(spec).map(|module| Action::AddModule { module }))
        .collect::<Result<Vec<_>, _>>()?;
    super::run_batch(root, &actions, dry_run).await?;
    Ok(())
}

/// Stop tracking modules and delete their vendored files
pub async fn remove(root: &Path, references: &[String], dry_run: bool) -> Result<()> {
    let actions = references
        .iter()
        .map(|reference| {
            parse_identity(reference).map(|(protocol, path)| Action::RemoveModule { protocol, path })
        })
        .collect::<Result<Vec<_>, _>>()?;
    super::run_batch(root, &actions, dry_run).await?;
    Ok(())
}

/// Pin modules to new versions
pub async fn update(root: &Path, specs: &[String], dry_run: bool) -> Result<()> {
    let actions = specs
        .iter()
        .map(|spec| {
            Module::parse(spec).map(|m| Action::UpdateModule {
                protocol: m.protocol,
                path: m.path,
                version: m.version,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    super::run_batch(root, &actions, dry_run).await?;
    Ok(())
}
