//! The manifest: the in-memory source of truth for a vendored workspace.

use crate::module::Module;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Modules and import aliases of one workspace.
///
/// After every successful mutation the manifest is normalized: modules are
/// sorted by [`Module::compare`], each module's files are sorted and
/// deduplicated, and aliases are ordered by key (guaranteed by the
/// `BTreeMap`). Serialization is therefore a function of content alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Vendored modules, unique by identity.
    #[serde(default)]
    pub modules: Vec<Module>,

    /// Alias path to target path (a module identity plus a file path).
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Manifest {
    /// Index of the module owning `probe`.
    ///
    /// Ownership is the first module in list order whose identity string is
    /// a prefix of `probe`. When identities nest (`p://a` and `p://a/b`) the
    /// earlier entry wins, not the longer one.
    pub fn owner_index(&self, probe: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.owns(probe))
    }

    /// Resolve `probe` to its owning module and the derived file path.
    pub fn resolve(&self, probe: &str) -> Option<(&Module, String)> {
        let module = &self.modules[self.owner_index(probe)?];
        let file = module.file_path(probe)?;
        Some((module, file))
    }

    /// Find a module by exact protocol and path.
    pub fn find(&self, protocol: &str, path: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.is(protocol, path))
    }

    /// Whether a module with the same identity as `module` is present.
    pub fn contains(&self, module: &Module) -> bool {
        self.modules.iter().any(|m| m.same_module(module))
    }

    /// Restore the deterministic ordering of modules and files.
    pub fn normalize(&mut self) {
        self.modules.sort_by(Module::compare);
        for module in &mut self.modules {
            module.files.sort();
            module.files.dedup();
        }
    }
}
