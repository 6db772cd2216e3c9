//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Warn when the static frontend is missing and make sure the data directory exists.
///
/// `data_dir` is only created when provided; database-backed deployments pass `None`.
pub async fn ensure_env(frontend_dir: &str, data_dir: Option<&Path>) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
    }
    if let Some(dir) = data_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    Ok(())
}
