use crate::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Reads the JSON document at `path` into `T`. Both configuration files and receipt files go
/// through here, so errors name the file.
pub async fn read_json<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    debug!("Reading {}", path.display());
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Unable to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("{} does not contain valid JSON", path.display()))
}
