//! Module records and module reference parsing.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Separator between a module's protocol and its path.
pub const SCHEME_SEPARATOR: &str = "://";

/// A vendored remote dependency.
///
/// A module is identified by its protocol and path. The pinned version and
/// the set of linked files are state, not identity: two records that differ
/// only by version describe the same module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Fetch scheme (e.g. `https`).
    pub protocol: String,

    /// Remote location without scheme or version (e.g. `deno.land/x/oak`).
    pub path: String,

    /// Currently pinned version identifier.
    pub version: String,

    /// Files of this module linked into the workspace, relative to the
    /// module root and starting with `/`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

/// Errors produced while parsing module references from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ModuleSpecError {
    /// The reference has no `protocol://` prefix.
    #[error("Missing protocol in '{0}': expected '<protocol>://<path>'")]
    MissingProtocol(String),

    /// The reference has no `@version` suffix.
    #[error("Missing version in '{0}': expected '<protocol>://<path>@<version>'")]
    MissingVersion(String),

    /// A component of the reference is empty.
    #[error("Empty {field} in '{spec}'")]
    EmptyField {
        /// Name of the empty component.
        field: &'static str,
        /// The reference as given.
        spec: String,
    },

    /// The protocol or path contains `.`/`..` segments or is absolute.
    #[error("Invalid path in '{0}': '.' and '..' segments are not allowed")]
    UnsafePath(String),
}

impl Module {
    /// Create a module record with no linked files.
    pub fn new(
        protocol: impl Into<String>,
        path: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            path: path.into(),
            version: version.into(),
            files: Vec::new(),
        }
    }

    /// Parse a versioned reference such as `https://deno.land/x/oak@v12.6.0`.
    ///
    /// The version is taken from the last `@` so scoped paths like
    /// `esm.sh/@scope/pkg@1.0.0` keep their inner `@`.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleSpecError`] if the protocol or version is missing or
    /// any component is empty.
    pub fn parse(spec: &str) -> Result<Self, ModuleSpecError> {
        let (protocol, rest) = split_protocol(spec)?;
        let Some((path, version)) = rest.rsplit_once('@') else {
            return Err(ModuleSpecError::MissingVersion(spec.to_string()));
        };
        if version.contains('/') {
            return Err(ModuleSpecError::MissingVersion(spec.to_string()));
        }
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Err(ModuleSpecError::EmptyField {
                field: "path",
                spec: spec.to_string(),
            });
        }
        if version.is_empty() {
            return Err(ModuleSpecError::EmptyField {
                field: "version",
                spec: spec.to_string(),
            });
        }
        let module = Self::new(protocol, path, version);
        module.check_paths(spec)?;
        Ok(module)
    }

    /// Check that the protocol and path can be used as directory names.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleSpecError::EmptyField`] or
    /// [`ModuleSpecError::UnsafePath`] for records that would not map to a
    /// directory below the vendor root.
    pub fn validate(&self) -> Result<(), ModuleSpecError> {
        let spec = self.to_string();
        for (field, value) in [("protocol", &self.protocol), ("path", &self.path)] {
            if value.is_empty() {
                return Err(ModuleSpecError::EmptyField { field, spec });
            }
        }
        self.check_paths(&spec)
    }

    fn check_paths(&self, spec: &str) -> Result<(), ModuleSpecError> {
        let bad_protocol = self.protocol.contains(['/', '\\']) || is_dot_segment(&self.protocol);
        if bad_protocol || unsafe_path(&self.path) {
            return Err(ModuleSpecError::UnsafePath(spec.to_string()));
        }
        Ok(())
    }

    /// Canonical identity string, `protocol://path`.
    pub fn identity(&self) -> String {
        format!("{}{SCHEME_SEPARATOR}{}", self.protocol, self.path)
    }

    /// Whether `other` names the same module, ignoring version and files.
    pub fn same_module(&self, other: &Module) -> bool {
        self.is(&other.protocol, &other.path)
    }

    /// Whether this module is exactly `protocol://path`.
    pub fn is(&self, protocol: &str, path: &str) -> bool {
        self.protocol == protocol && self.path == path
    }

    /// Deterministic manifest order: protocol, then path.
    pub fn compare(&self, other: &Module) -> Ordering {
        self.protocol
            .cmp(&other.protocol)
            .then_with(|| self.path.cmp(&other.path))
    }

    /// Whether this module's identity is a prefix of `probe`.
    pub fn owns(&self, probe: &str) -> bool {
        probe
            .strip_prefix(self.protocol.as_str())
            .and_then(|rest| rest.strip_prefix(SCHEME_SEPARATOR))
            .is_some_and(|rest| rest.starts_with(self.path.as_str()))
    }

    /// Derive the module-relative file path from a probe this module owns.
    ///
    /// The identity prefix is stripped, then a leading `@<version>` segment
    /// if the probe carries one, so both `https://host/mod/a.ts` and
    /// `https://host/mod@v1/a.ts` yield `/a.ts`.
    pub fn file_path(&self, probe: &str) -> Option<String> {
        let rest = probe
            .strip_prefix(self.protocol.as_str())?
            .strip_prefix(SCHEME_SEPARATOR)?
            .strip_prefix(self.path.as_str())?;
        let file = match rest.strip_prefix('@') {
            Some(versioned) => versioned.find('/').map_or("", |i| &versioned[i..]),
            None => rest,
        };
        Some(file.to_string())
    }

    /// Whether `file` is currently linked.
    pub fn has_file(&self, file: &str) -> bool {
        self.files.iter().any(|f| f == file)
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.identity(), self.version)
    }
}

/// Split an unversioned reference `protocol://path` into its parts.
///
/// # Errors
///
/// Returns [`ModuleSpecError`] if the protocol separator is missing or a
/// component is empty.
pub fn parse_identity(reference: &str) -> Result<(String, String), ModuleSpecError> {
    let (protocol, path) = split_protocol(reference)?;
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        return Err(ModuleSpecError::EmptyField {
            field: "path",
            spec: reference.to_string(),
        });
    }
    if unsafe_path(path) {
        return Err(ModuleSpecError::UnsafePath(reference.to_string()));
    }
    Ok((protocol.to_string(), path.to_string()))
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

fn unsafe_path(path: &str) -> bool {
    path.starts_with('/') || path.split(['/', '\\']).any(is_dot_segment)
}

fn split_protocol(spec: &str) -> Result<(&str, &str), ModuleSpecError> {
    let Some((protocol, rest)) = spec.split_once(SCHEME_SEPARATOR) else {
        return Err(ModuleSpecError::MissingProtocol(spec.to_string()));
    };
    if protocol.is_empty() {
        return Err(ModuleSpecError::EmptyField {
            field: "protocol",
            spec: spec.to_string(),
        });
    }
    Ok((protocol, rest))
}
