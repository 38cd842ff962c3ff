//! Apply command

use anyhow::{Context, Result};
use std::path::Path;
use vendr_core::Action;

/// Apply a JSON array of actions as one batch
pub async fn apply(root: &Path, file: &Path, dry_run: bool) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let actions: Vec<Action> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse actions in {}", file.display()))?;

    if actions.is_empty() {
        crate::ui::Output::new().info("Nothing to apply.");
        return Ok(());
    }

    tracing::debug!("Applying {} action(s) from {}", actions.len(), file.display());
    super::run_batch(root, &actions, dry_run).await?;
    Ok(())
}
