//! Declarative workspace actions.

use crate::module::{Module, SCHEME_SEPARATOR};
use serde::{Deserialize, Serialize};

/// A declarative change to a workspace.
///
/// Both the state mutator and the repository synchronizer match on this
/// enum exhaustively, so a new variant has to be handled in both phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Start tracking a remote module.
    AddModule {
        /// The module to add; its `files` are taken as-is.
        module: Module,
    },

    /// Stop tracking the module owning `protocol://path`.
    RemoveModule {
        /// Module protocol.
        protocol: String,
        /// Module path, optionally followed by a sub-path.
        path: String,
    },

    /// Link a file of a module into the workspace.
    AddLink {
        /// Module identity followed by the file path.
        link: String,
    },

    /// Remove a linked file.
    RemoveLink {
        /// Module identity followed by the file path.
        link: String,
    },

    /// Create a local import alias for a module file.
    AddAlias {
        /// Workspace-relative alias path.
        alias: String,
        /// Module identity followed by the file path.
        target: String,
    },

    /// Delete a local import alias.
    RemoveAlias {
        /// Workspace-relative alias path.
        alias: String,
    },

    /// Pin a module to a new version.
    UpdateModule {
        /// Module protocol.
        protocol: String,
        /// Module path.
        path: String,
        /// The version to pin.
        version: String,
    },
}

impl Action {
    /// Short lowercase name of the action kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddModule { .. } => "add-module",
            Action::RemoveModule { .. } => "remove-module",
            Action::AddLink { .. } => "add-link",
            Action::RemoveLink { .. } => "remove-link",
            Action::AddAlias { .. } => "add-alias",
            Action::RemoveAlias { .. } => "remove-alias",
            Action::UpdateModule { .. } => "update-module",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::AddModule { module } => write!(f, "add {module}"),
            Action::RemoveModule { protocol, path } => {
                write!(f, "remove {protocol}{SCHEME_SEPARATOR}{path}")
            }
            Action::AddLink { link } => write!(f, "link {link}"),
            Action::RemoveLink { link } => write!(f, "unlink {link}"),
            Action::AddAlias { alias, target } => write!(f, "alias {alias} -> {target}"),
            Action::RemoveAlias { alias } => write!(f, "unalias {alias}"),
            Action::UpdateModule {
                protocol,
                path,
                version,
            } => write!(f, "update {protocol}{SCHEME_SEPARATOR}{path}@{version}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_snake_case_tags() {
        let json = r#"[
            {"type": "add_module", "module": {"protocol": "https", "path": "example.com/mod", "version": "v1"}},
            {"type": "add_link", "link": "https://example.com/mod@v1/util.ts"},
            {"type": "update_module", "protocol": "https", "path": "example.com/mod", "version": "v2"}
        ]"#;

        let actions: Vec<Action> = serde_json::from_str(json).unwrap();
        assert_eq!(
            actions[0],
            Action::AddModule {
                module: Module::new("https", "example.com/mod", "v1")
            }
        );
        assert_eq!(actions[1].kind(), "add-link");
        assert_eq!(
            actions[2].to_string(),
            "update https://example.com/mod@v2"
        );
    }

    #[test]
    fn display_describes_action() {
        let action = Action::AddAlias {
            alias: "deps/oak.ts".into(),
            target: "https://deno.land/x/oak/mod.ts".into(),
        };
        assert_eq!(
            action.to_string(),
            "alias deps/oak.ts -> https://deno.land/x/oak/mod.ts"
        );
    }
}
