//! Shared data model for vendr.
//!
//! A [`Manifest`] lists the vendored [`Module`]s of a workspace and the
//! import aliases pointing into them. An [`Action`] describes one change to
//! that manifest; batches of actions are applied by `vendr-core`.

pub mod action;
pub mod manifest;
pub mod module;

// Re-exports
pub use action::Action;
pub use manifest::Manifest;
pub use module::{Module, ModuleSpecError, parse_identity};
