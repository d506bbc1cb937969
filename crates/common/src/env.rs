//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the parent directory of a file-backed state store exists.
pub async fn ensure_data_dir(data_path: &str) -> anyhow::Result<()> {
    let Some(parent) = Path::new(data_path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "state directory missing; creating it");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    info!(dir = %parent.display(), "state directory ready");
    Ok(())
}
