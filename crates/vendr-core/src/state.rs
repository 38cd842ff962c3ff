//! Pure manifest mutation.
//!
//! [`mutate`] applies a batch of [`Action`]s to a copy of a manifest and
//! returns the copy. It never touches the filesystem or the network; the
//! side effects of the same batch are replayed afterwards by
//! [`crate::sync::Synchronizer`].

use crate::error::StateError;
use vendr_schema::module::SCHEME_SEPARATOR;
use vendr_schema::{Action, Manifest};

/// Apply `actions` in order to a copy of `manifest`.
///
/// Processing stops at the first invalid action. Because the work happens on
/// a copy, `manifest` is untouched whether or not the batch succeeds. The
/// returned manifest is normalized (see [`Manifest::normalize`]) no matter
/// which actions ran.
///
/// Removing a module does not remove aliases that point into it.
///
/// # Errors
///
/// Returns the [`StateError`] of the first action that violates a manifest
/// invariant.
pub fn mutate(manifest: &Manifest, actions: &[Action]) -> Result<Manifest, StateError> {
    let mut next = manifest.clone();

    for action in actions {
        tracing::debug!("Applying {action}");
        apply(&mut next, action)?;
    }

    next.normalize();
    Ok(next)
}

fn apply(manifest: &mut Manifest, action: &Action) -> Result<(), StateError> {
    match action {
        Action::AddModule { module } => {
            module.validate()?;
            if manifest.contains(module) {
                return Err(StateError::DuplicateModule(module.identity()));
            }
            manifest.modules.push(module.clone());
        }
        Action::RemoveModule { protocol, path } => {
            let probe = format!("{protocol}{SCHEME_SEPARATOR}{path}");
            let index = manifest
                .owner_index(&probe)
                .ok_or(StateError::ModuleNotFound(probe))?;
            manifest.modules.remove(index);
        }
        Action::AddLink { link } => {
            let (index, file) = owned_file(manifest, link)?;
            let module = &mut manifest.modules[index];
            if !module.has_file(&file) {
                module.files.push(file);
            }
        }
        Action::RemoveLink { link } => {
            let (index, file) = owned_file(manifest, link)?;
            let module = &mut manifest.modules[index];
            let Some(pos) = module.files.iter().position(|f| *f == file) else {
                return Err(StateError::LinkNotFound {
                    module: module.identity(),
                    file,
                });
            };
            module.files.remove(pos);
        }
        Action::AddAlias { alias, target } => {
            if manifest.aliases.contains_key(alias) {
                return Err(StateError::AliasExists(alias.clone()));
            }
            owned_file(manifest, target)?;
            manifest.aliases.insert(alias.clone(), target.clone());
        }
        Action::RemoveAlias { alias } => {
            if manifest.aliases.remove(alias).is_none() {
                return Err(StateError::AliasNotFound(alias.clone()));
            }
        }
        Action::UpdateModule {
            protocol,
            path,
            version,
        } => {
            let module = manifest
                .modules
                .iter_mut()
                .find(|m| m.is(protocol, path))
                .ok_or_else(|| {
                    StateError::ModuleNotFound(format!("{protocol}{SCHEME_SEPARATOR}{path}"))
                })?;
            module.version.clone_from(version);
        }
    }
    Ok(())
}

/// Owning module index and derived file path for `probe`.
fn owned_file(manifest: &Manifest, probe: &str) -> Result<(usize, String), StateError> {
    manifest
        .owner_index(probe)
        .and_then(|index| Some((index, manifest.modules[index].file_path(probe)?)))
        .ok_or_else(|| StateError::ModuleNotFound(probe.to_string()))
}
