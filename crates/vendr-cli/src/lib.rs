//! vendr - vendor remote modules into a local workspace
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! # Overview
//!
//! vendr tracks remote modules in a `vendr.toml` manifest and materializes
//! the files you link from them as re-export shims under `vendor/`. Local
//! aliases give those files short, stable import paths.
//!
//! Every command builds a batch of actions, applies it to the manifest, then
//! replays it against the workspace. The manifest is only written once the
//! workspace is in sync.
//!
//! # Directory Layout
//!
//! ```text
//! <root>/
//! ├── vendr.toml     # Manifest: modules, linked files, aliases
//! ├── vendor/        # Link shims by protocol/path/file
//! └── <aliases>      # Alias shims at their workspace-relative paths
//! ```

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "vendr")]
#[command(author, version, about = "vendr - vendor remote modules into a local workspace")]
pub struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, env = "VENDR_ROOT")]
    pub root: Option<PathBuf>,

    /// Show what would happen without making changes
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Track remote modules
    Add {
        /// Module reference(s): protocol://path@version
        #[arg(required = true)]
        modules: Vec<String>,
    },
    /// Stop tracking modules and delete their vendored files
    Remove {
        /// Module reference(s): protocol://path
        #[arg(required = true)]
        modules: Vec<String>,
    },
    /// Pin modules to new versions and relink their files
    Update {
        /// Module reference(s): protocol://path@version
        #[arg(required = true)]
        modules: Vec<String>,
    },
    /// Link module files into the vendor directory
    Link {
        /// File URL(s), e.g. https://deno.land/x/oak@v12.6.0/mod.ts
        #[arg(required = true)]
        links: Vec<String>,
    },
    /// Remove linked files
    Unlink {
        /// File URL(s)
        #[arg(required = true)]
        links: Vec<String>,
    },
    /// Create a local alias for a module file
    Alias {
        /// Workspace-relative alias path, e.g. deps/oak.ts
        alias: String,
        /// File URL the alias points to
        target: String,
    },
    /// Delete local aliases
    Unalias {
        /// Alias path(s)
        #[arg(required = true)]
        aliases: Vec<String>,
    },
    /// Apply a batch of actions from a JSON file
    Apply {
        /// JSON array of actions
        file: PathBuf,
    },
    /// List tracked modules, linked files and aliases
    List {
        /// Print the manifest as JSON
        #[arg(long)]
        json: bool,
    },
}
