use std::io;
use std::path::{Component, Path, PathBuf};

/// Manifest file name at the workspace root.
pub const MANIFEST_FILE: &str = "vendr.toml";

/// Vendor directory name at the workspace root.
pub const VENDOR_DIR: &str = "vendor";

/// Environment variable overriding the workspace root.
pub const ROOT_ENV: &str = "VENDR_ROOT";

/// Returns the workspace root: `VENDR_ROOT` if set, else the current directory.
pub fn try_workspace_root() -> Option<PathBuf> {
    if let Ok(val) = std::env::var(ROOT_ENV) {
        return Some(PathBuf::from(val));
    }
    std::env::current_dir().ok()
}

/// Manifest path: `<root>/vendr.toml`
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

/// Vendor root: `<root>/vendor`
pub fn vendor_root(root: &Path) -> PathBuf {
    root.join(VENDOR_DIR)
}

/// Interpret `rel` as a path strictly below some root.
///
/// Leading and trailing `/` are ignored. What remains must be non-empty and
/// made only of plain names: `.`, `..`, root and prefix components are
/// refused.
///
/// # Errors
///
/// Returns an [`io::ErrorKind::InvalidInput`] error if `rel` could resolve
/// outside the root it is joined onto.
pub fn confined(rel: &str) -> io::Result<&Path> {
    let path = Path::new(rel.trim_matches('/'));
    let mut components = path.components().peekable();
    if components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_))) {
        Ok(path)
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Refusing path '{rel}': it must stay inside its root"),
        ))
    }
}

/// On-disk location of a module file: `<vendor-root>/<protocol>/<path>/<file>`.
///
/// # Errors
///
/// Returns an [`io::ErrorKind::InvalidInput`] error if any part would leave
/// the module directory (see [`confined`]).
pub fn vendor_path(
    vendor_root: &Path,
    protocol: &str,
    path: &str,
    file: &str,
) -> io::Result<PathBuf> {
    Ok(module_dir(vendor_root, protocol, path)?.join(confined(file)?))
}

/// Directory holding every vendored file of a module.
///
/// # Errors
///
/// Returns an [`io::ErrorKind::InvalidInput`] error if `protocol` is not a
/// single plain name or `path` would leave the vendor root.
pub fn module_dir(vendor_root: &Path, protocol: &str, path: &str) -> io::Result<PathBuf> {
    let scheme = confined(protocol)?;
    if scheme.components().count() != 1 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Refusing protocol '{protocol}'"),
        ));
    }
    Ok(vendor_root.join(scheme).join(confined(path)?))
}

/// Canonical fetch URL of a module file, `protocol://path@version/file`.
///
/// # Example
///
/// ```
/// use vendr_core::paths::module_url;
///
/// assert_eq!(
///     module_url("https", "deno.land/x/oak", "v12.6.0", "/mod.ts"),
///     "https://deno.land/x/oak@v12.6.0/mod.ts"
/// );
/// ```
pub fn module_url(protocol: &str, path: &str, version: &str, file: &str) -> String {
    format!("{protocol}://{path}@{version}{file}")
}
