//! Manifest persistence.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::TargetManifest;
use crate::Result;
use crate::file_tools;

/// Persists a [`TargetManifest`] to a file.
#[async_trait]
pub trait ManifestWriter: Send + Sync {
    /// Write `manifest` to `path`, replacing any existing file.
    async fn write_manifest(&self, manifest: &TargetManifest, path: &Path) -> Result<()>;
}

/// Writes manifests as pretty-printed JSON.
///
/// Output is deterministic for equal manifests, so regenerating a package
/// yields a byte-identical `manifest.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestWriter;

#[async_trait]
impl ManifestWriter for JsonManifestWriter {
    async fn write_manifest(&self, manifest: &TargetManifest, path: &Path) -> Result<()> {
        file_tools::write_json(path, manifest).await?;
        debug!("Wrote manifest to {}", path.display());
        Ok(())
    }
}
