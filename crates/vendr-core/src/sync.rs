//! Replays a batch of actions against the physical workspace.

use crate::error::SyncError;
use crate::inspect::ExportInspector;
use crate::paths::{module_url, vendor_path};
use crate::repository::Repository;
use std::fmt;
use std::path::PathBuf;
use vendr_schema::{Action, Manifest, Module};

/// Groups the collaborators used while synchronizing a workspace.
pub struct Synchronizer<'a> {
    repository: &'a dyn Repository,
    inspector: &'a dyn ExportInspector,
    vendor_root: PathBuf,
}

impl fmt::Debug for Synchronizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer")
            .field("vendor_root", &self.vendor_root)
            .finish_non_exhaustive()
    }
}

impl<'a> Synchronizer<'a> {
    /// Synchronizer writing through `repository` and resolving local files
    /// against `vendor_root`.
    pub fn new(
        repository: &'a dyn Repository,
        inspector: &'a dyn ExportInspector,
        vendor_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            inspector,
            vendor_root: vendor_root.into(),
        }
    }

    /// Apply the side effects of `actions`, one at a time, in the given order.
    ///
    /// `manifest` must be the result of mutating `previous` with the same
    /// `actions`: module ownership and versions are read from it, not from
    /// the actions. A `RemoveModule` may name a sub-path of the module it
    /// removes, so its owner is resolved by replaying module additions and
    /// removals on top of `previous`.
    ///
    /// The first failure aborts the batch. Effects of earlier actions are
    /// not rolled back; re-running the batch reconciles the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ExportInspectionFailed`] when a remote inspection
    /// fails or a local one fails for any reason other than a missing file,
    /// and [`SyncError::Repository`] when a file operation fails.
    pub async fn synchronize(
        &self,
        previous: &Manifest,
        manifest: &Manifest,
        actions: &[Action],
    ) -> Result<(), SyncError> {
        let mut tracked = previous.modules.clone();
        for action in actions {
            tracing::debug!("Synchronizing {action}");
            self.apply(manifest, &mut tracked, action).await?;
        }
        Ok(())
    }

    async fn apply(
        &self,
        manifest: &Manifest,
        tracked: &mut Vec<Module>,
        action: &Action,
    ) -> Result<(), SyncError> {
        match action {
            // Nothing on disk until a file is linked.
            Action::AddModule { module } => tracked.push(module.clone()),
            Action::RemoveModule { protocol, path } => {
                let probe = format!("{protocol}://{path}");
                let index = tracked
                    .iter()
                    .position(|m| m.owns(&probe))
                    .ok_or(SyncError::UnknownModule(probe))?;
                let owner = tracked.remove(index);
                self.repository
                    .remove_module(&owner.protocol, &owner.path)
                    .await?;
            }
            Action::AddLink { link } => {
                let (module, file) = resolve(manifest, link)?;
                let has_default = self.remote_default_export(module, &file).await?;
                self.repository
                    .add_link(
                        &module.protocol,
                        &module.path,
                        &module.version,
                        &file,
                        has_default,
                    )
                    .await?;
            }
            Action::RemoveLink { link } => {
                let (module, file) = resolve(manifest, link)?;
                self.repository
                    .remove_link(&module.protocol, &module.path, &file)
                    .await?;
            }
            Action::AddAlias { alias, target } => {
                let (module, file) = resolve(manifest, target)?;
                let local =
                    vendor_path(&self.vendor_root, &module.protocol, &module.path, &file)?;
                let has_default = match self.inspector.local_has_default_export(&local).await {
                    Ok(has_default) => has_default,
                    Err(e) if e.is_not_found() => {
                        tracing::warn!(
                            "{} is not vendored yet; assuming no default export",
                            local.display()
                        );
                        false
                    }
                    Err(source) => {
                        return Err(SyncError::ExportInspectionFailed {
                            target: local.display().to_string(),
                            source,
                        });
                    }
                };
                self.repository
                    .add_alias(&module.protocol, &module.path, &file, alias, has_default)
                    .await?;
            }
            Action::RemoveAlias { alias } => {
                self.repository.remove_alias(alias).await?;
            }
            Action::UpdateModule { protocol, path, .. } => {
                let module = manifest
                    .find(protocol, path)
                    .ok_or_else(|| SyncError::UnknownModule(format!("{protocol}://{path}")))?;
                tracing::info!(
                    "Relinking {} file(s) of {module}",
                    module.files.len()
                );
                for file in &module.files {
                    let has_default = self.remote_default_export(module, file).await?;
                    self.repository
                        .update_link(
                            &module.protocol,
                            &module.path,
                            &module.version,
                            file,
                            has_default,
                        )
                        .await?;
                }
            }
        }
        Ok(())
    }

    async fn remote_default_export(&self, module: &Module, file: &str) -> Result<bool, SyncError> {
        let url = module_url(&module.protocol, &module.path, &module.version, file);
        self.inspector
            .remote_has_default_export(&url)
            .await
            .map_err(|source| SyncError::ExportInspectionFailed {
                target: url,
                source,
            })
    }
}

fn resolve<'m>(manifest: &'m Manifest, probe: &str) -> Result<(&'m Module, String), SyncError> {
    manifest
        .resolve(probe)
        .ok_or_else(|| SyncError::UnknownModule(probe.to_string()))
}
