//! Error types for manifest mutation and workspace synchronization.

use std::io;
use thiserror::Error;
use vendr_schema::ModuleSpecError;

/// Validation failures raised while applying actions to a manifest.
///
/// Any of these aborts the whole batch; the caller's manifest is left as it
/// was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A module with the same protocol and path is already tracked.
    #[error("Module '{0}' already exists")]
    DuplicateModule(String),

    /// No tracked module owns the given identity or file URL.
    #[error("No module found for '{0}'")]
    ModuleNotFound(String),

    /// The file is not among the owning module's linked files.
    #[error("File '{file}' is not linked in module '{module}'")]
    LinkNotFound {
        /// Identity of the owning module.
        module: String,
        /// Module-relative file path.
        file: String,
    },

    /// The alias path is already taken.
    #[error("Alias '{0}' already exists")]
    AliasExists(String),

    /// No alias with that path exists.
    #[error("Alias '{0}' not found")]
    AliasNotFound(String),

    /// A module record cannot be mapped to a vendor directory.
    #[error(transparent)]
    InvalidModule(#[from] ModuleSpecError),
}

/// Failure to determine whether a source file has a default export.
#[derive(Error, Debug)]
pub enum InspectError {
    #[cfg(feature = "network")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl InspectError {
    /// Whether the inspected file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            #[cfg(feature = "network")]
            InspectError::Http(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            InspectError::Io(e) => e.kind() == io::ErrorKind::NotFound,
        }
    }
}

/// Failures while replaying actions against the workspace.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Fetching or reading a file to check for a default export failed.
    #[error("Export inspection failed for {target}: {source}")]
    ExportInspectionFailed {
        /// URL or local path that was inspected.
        target: String,
        /// Underlying failure.
        #[source]
        source: InspectError,
    },

    /// A repository write or removal failed.
    #[error("Repository error: {0}")]
    Repository(#[from] io::Error),

    /// The manifest handed to the synchronizer does not contain the module
    /// an action refers to, i.e. it is not the mutator's output for the
    /// same batch.
    #[error("Module for '{0}' is missing from the manifest")]
    UnknownModule(String),
}
