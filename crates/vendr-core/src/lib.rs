//! Core library for vendr.
//!
//! A batch of [`Action`]s is applied in two phases:
//!
//! 1. [`mutate`] produces the new [`Manifest`] from a copy of the old one,
//!    enforcing every manifest invariant.
//! 2. [`Synchronizer::synchronize`] replays the same actions against the
//!    workspace through a [`Repository`] and an [`ExportInspector`], reading
//!    module ownership from the new manifest.

pub mod error;
pub mod inspect;
pub mod paths;
pub mod repository;
pub mod state;
pub mod store;
pub mod sync;

pub use error::{InspectError, StateError, SyncError};
#[cfg(feature = "network")]
pub use inspect::HttpInspector;
pub use inspect::{ExportInspector, has_default_export};
pub use repository::{FsRepository, Repository};
pub use state::mutate;
pub use store::Store;
pub use sync::Synchronizer;
pub use vendr_schema::{Action, Manifest, Module};

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("vendr-core/", env!("CARGO_PKG_VERSION"));
