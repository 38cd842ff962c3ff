//! List command

use crate::ui::Output;
use anyhow::Result;
use std::path::Path;
use vendr_core::Store;
use vendr_core::paths::manifest_path;

/// List tracked modules, linked files and aliases
pub async fn list(root: &Path, json: bool) -> Result<()> {
    let store = Store::load(&manifest_path(root)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&store.config)?);
    } else {
        Output::new().manifest(&store.config);
    }

    Ok(())
}
