//! Physical workspace persistence.
//!
//! Linked files are materialized as small re-export shims under the vendor
//! root, one per module file:
//!
//! ```text
//! <root>/
//! ├── vendr.toml
//! ├── deps/oak.ts                       # alias shim -> vendored link
//! └── vendor/
//!     └── https/deno.land/x/oak/mod.ts  # link shim -> remote URL
//! ```

use crate::paths::{confined, module_dir, module_url, vendor_path, vendor_root};
use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Persistence collaborator creating and removing link and alias files.
///
/// Removals must tolerate files that are already gone so that a failed
/// batch can simply be replayed. Writes and removals stay inside the vendor
/// root (links) or the workspace root (aliases); anything else fails with
/// [`io::ErrorKind::InvalidInput`].
#[async_trait]
pub trait Repository: Send + Sync {
    /// Delete every vendored file of a module.
    async fn remove_module(&self, protocol: &str, path: &str) -> io::Result<()>;

    /// Materialize a linked file.
    async fn add_link(
        &self,
        protocol: &str,
        path: &str,
        version: &str,
        file: &str,
        has_default_export: bool,
    ) -> io::Result<()>;

    /// Delete a linked file.
    async fn remove_link(&self, protocol: &str, path: &str, file: &str) -> io::Result<()>;

    /// Rewrite a linked file after its module changed version.
    async fn update_link(
        &self,
        protocol: &str,
        path: &str,
        version: &str,
        file: &str,
        has_default_export: bool,
    ) -> io::Result<()>;

    /// Create an alias file pointing at a vendored module file.
    async fn add_alias(
        &self,
        protocol: &str,
        path: &str,
        file: &str,
        alias: &str,
        has_default_export: bool,
    ) -> io::Result<()>;

    /// Delete an alias file.
    async fn remove_alias(&self, alias: &str) -> io::Result<()>;
}

/// [`Repository`] writing shim files into a workspace directory.
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
    vendor_root: PathBuf,
}

impl FsRepository {
    /// Repository for the workspace at `root`, vendoring into `<root>/vendor`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let vendor_root = vendor_root(&root);
        Self { root, vendor_root }
    }

    /// Workspace root; alias files live below it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the link shims.
    pub fn vendor_root(&self) -> &Path {
        &self.vendor_root
    }

    fn alias_path(&self, alias: &str) -> io::Result<PathBuf> {
        Ok(self.root.join(confined(alias)?))
    }

    async fn write_link(
        &self,
        protocol: &str,
        path: &str,
        version: &str,
        file: &str,
        has_default_export: bool,
    ) -> io::Result<()> {
        let dest = vendor_path(&self.vendor_root, protocol, path, file)?;
        let url = module_url(protocol, path, version, file);
        write_file(&dest, &reexport(&url, has_default_export)).await
    }
}

#[async_trait]
impl Repository for FsRepository {
    async fn remove_module(&self, protocol: &str, path: &str) -> io::Result<()> {
        let dir = module_dir(&self.vendor_root, protocol, path)?;
        tracing::debug!("Removing {}", dir.display());
        ignore_missing(tokio::fs::remove_dir_all(&dir).await)?;
        if let Some(parent) = dir.parent() {
            prune_empty_dirs(parent, &self.vendor_root).await;
        }
        Ok(())
    }

    async fn add_link(
        &self,
        protocol: &str,
        path: &str,
        version: &str,
        file: &str,
        has_default_export: bool,
    ) -> io::Result<()> {
        self.write_link(protocol, path, version, file, has_default_export)
            .await
    }

    async fn remove_link(&self, protocol: &str, path: &str, file: &str) -> io::Result<()> {
        let dest = vendor_path(&self.vendor_root, protocol, path, file)?;
        tracing::debug!("Removing {}", dest.display());
        ignore_missing(tokio::fs::remove_file(&dest).await)?;
        if let Some(parent) = dest.parent() {
            prune_empty_dirs(parent, &self.vendor_root).await;
        }
        Ok(())
    }

    async fn update_link(
        &self,
        protocol: &str,
        path: &str,
        version: &str,
        file: &str,
        has_default_export: bool,
    ) -> io::Result<()> {
        self.write_link(protocol, path, version, file, has_default_export)
            .await
    }

    async fn add_alias(
        &self,
        protocol: &str,
        path: &str,
        file: &str,
        alias: &str,
        has_default_export: bool,
    ) -> io::Result<()> {
        let dest = self.alias_path(alias)?;
        let target = vendor_path(&self.vendor_root, protocol, path, file)?;
        let from_dir = dest.parent().unwrap_or(self.root.as_path());
        let specifier = relative_specifier(from_dir, &target);
        write_file(&dest, &reexport(&specifier, has_default_export)).await
    }

    async fn remove_alias(&self, alias: &str) -> io::Result<()> {
        let dest = self.alias_path(alias)?;
        tracing::debug!("Removing {}", dest.display());
        ignore_missing(tokio::fs::remove_file(&dest).await)
    }
}

/// Source of a shim re-exporting `specifier`.
fn reexport(specifier: &str, has_default_export: bool) -> String {
    let mut out = format!("export * from \"{specifier}\";\n");
    if has_default_export {
        out.push_str(&format!("export {{ default }} from \"{specifier}\";\n"));
    }
    out
}

async fn write_file(dest: &Path, content: &str) -> io::Result<()> {
    tracing::debug!("Writing {}", dest.display());
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, content).await
}

fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Remove `dir` and its ancestors while they are empty, stopping at `stop`.
async fn prune_empty_dirs(dir: &Path, stop: &Path) {
    let mut current = dir;
    while current != stop && current.starts_with(stop) {
        // Fails on non-empty directories, which ends the walk.
        if tokio::fs::remove_dir(current).await.is_err() {
            break;
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
}

/// Import specifier for `to`, relative to the directory `from_dir`.
fn relative_specifier(from_dir: &Path, to: &Path) -> String {
    let from: Vec<Component<'_>> = from_dir.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{joined}")
    }
}
