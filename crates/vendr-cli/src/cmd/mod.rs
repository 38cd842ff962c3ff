//! Command implementations.

pub mod alias;
pub mod apply;
pub mod link;
pub mod list;
pub mod module;

use crate::ui::Output;
use anyhow::{Context, Result};
use std::path::Path;
use vendr_core::paths::{manifest_path, vendor_root};
use vendr_core::{Action, FsRepository, HttpInspector, Manifest, Store, Synchronizer, mutate};

/// Apply a batch of actions to the workspace at `root`.
///
/// The manifest is mutated first, then the workspace is synchronized, and
/// only then is the new manifest saved. A failed synchronization leaves the
/// manifest on disk unchanged so the same command can be re-run.
pub async fn run_batch(root: &Path, actions: &[Action], dry_run: bool) -> Result<Manifest> {
    let output = Output::new();
    let mut store = Store::load(&manifest_path(root)).await?;

    let next = mutate(&store.config, actions).context("Invalid change")?;

    if dry_run {
        output.planned(actions);
        output.manifest(&next);
        output.info("(dry run) no files were changed");
        return Ok(next);
    }

    let repository = FsRepository::new(root);
    let inspector = HttpInspector::default();
    Synchronizer::new(&repository, &inspector, vendor_root(root))
        .synchronize(&store.config, &next, actions)
        .await
        .context("Failed to synchronize workspace")?;

    store.replace(next.clone());
    store
        .save()
        .await
        .with_context(|| format!("Failed to write {}", store.path.display()))?;

    for action in actions {
        output.success(&action.to_string());
    }
    Ok(next)
}
