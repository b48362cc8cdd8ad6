//! Release metadata bundled with the provider
//!
//! The version is read once per process. A failed read leaves the cache
//! empty, so the next caller tries again instead of seeing a stale failure.

use std::future::Future;

use remoteconf_provider::ProviderError;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::warn;

use crate::constants::UNKNOWN_VERSION;

const RELEASE_METADATA: &str = include_str!("../resources/release.toml");

static RELEASE_VERSION: OnceCell<String> = OnceCell::const_new();

#[derive(Debug, Deserialize)]
struct ReleaseMetadata {
    release: Option<ReleaseSection>,
}

#[derive(Debug, Deserialize)]
struct ReleaseSection {
    version: Option<String>,
}

/// Extract the release version from TOML metadata
pub fn parse_version(metadata: &str) -> Result<String, ProviderError> {
    let metadata: ReleaseMetadata =
        toml::from_str(metadata).map_err(|e| ProviderError::Metadata(e.to_string()))?;

    Ok(metadata
        .release
        .and_then(|release| release.version)
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string()))
}

/// Provider release version, shared process-wide after the first successful read
pub async fn release_version() -> Result<&'static str, ProviderError> {
    cached_version(&RELEASE_VERSION, || async { parse_version(RELEASE_METADATA) }).await
}

/// Read a version through `cell`, running `load` only while the cell is empty.
///
/// Concurrent first callers wait for a single `load`.
pub async fn cached_version<F, Fut>(
    cell: &OnceCell<String>,
    load: F,
) -> Result<&str, ProviderError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, ProviderError>>,
{
    let version = cell.get_or_try_init(load).await.inspect_err(|e| {
        warn!("Failed to read release metadata (will retry on demand): {}", e);
    })?;
    Ok(version.as_str())
}
