//! Terminal output helpers.

use crossterm::style::Stylize;
use vendr_schema::{Action, Manifest};

/// Plain line-oriented reporter for command results.
#[derive(Debug, Default, Clone, Copy)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn info(&self, msg: &str) {
        println!("  {msg}");
    }

    pub fn success(&self, msg: &str) {
        println!("  {} {msg}", "✓".green());
    }

    /// One line per action of a dry run.
    pub fn planned(&self, actions: &[Action]) {
        for action in actions {
            println!("  {} would {action}", "•".dark_grey());
        }
    }

    /// Human-readable manifest listing.
    pub fn manifest(&self, manifest: &Manifest) {
        if manifest.modules.is_empty() && manifest.aliases.is_empty() {
            println!();
            println!("  No modules tracked.");
            println!("  Run 'vendr add <protocol://path@version>' to get started.");
            return;
        }

        for module in &manifest.modules {
            println!(
                "  {} {}",
                module.identity().cyan(),
                module.version.as_str().green()
            );
            for file in &module.files {
                println!("    {}", file.as_str().dark_grey());
            }
        }

        if !manifest.aliases.is_empty() {
            println!();
            for (alias, target) in &manifest.aliases {
                let dangling = manifest.resolve(target).is_none();
                let line = format!("  {alias} -> {target}");
                if dangling {
                    println!("{} {}", line, "(no module)".yellow());
                } else {
                    println!("{line}");
                }
            }
        }

        println!();
        println!(
            "{}",
            format!(
                "  {} modules, {} aliases",
                manifest.modules.len(),
                manifest.aliases.len()
            )
            .dark_grey()
        );
    }
}
