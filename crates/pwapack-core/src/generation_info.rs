//! Generation metadata written into every package.
//!
//! The record identifies the tool and version that produced the package,
//! when, for which platform, and a fingerprint of the source manifest so a
//! package can be traced back to its input.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::manifest::SourceManifest;
use crate::{Result, file_tools};

/// File name of the metadata record inside the package directory.
pub const GENERATION_INFO_FILE: &str = "generationInfo.json";

/// Tool identity recorded in `generatedBy`.
pub const GENERATOR_NAME: &str = "pwapack";

/// Metadata about one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInfo {
    /// Tool that produced the package.
    pub generated_by: String,
    /// Tool version.
    pub version: String,
    /// When the package was generated.
    pub generated_at: DateTime<Utc>,
    /// Platform id.
    pub platform: String,
    /// Package identity from the generation options.
    pub package_name: String,
    /// Base64 SHA-256 of the source manifest.
    pub source_manifest_sha256: String,
}

impl GenerationInfo {
    /// Build a record for `source`, stamped with the current time.
    pub fn new(platform: &str, package_name: &str, source: &SourceManifest) -> Result<Self> {
        Ok(Self {
            generated_by: GENERATOR_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            platform: platform.to_string(),
            package_name: package_name.to_string(),
            source_manifest_sha256: source.fingerprint()?,
        })
    }

    /// Write the record to [`GENERATION_INFO_FILE`] inside `package_dir`.
    pub async fn write(&self, package_dir: &Path) -> Result<PathBuf> {
        let path = package_dir.join(GENERATION_INFO_FILE);
        file_tools::write_json(&path, self).await?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read_back() {
        let dir = TempDir::new().unwrap();
        let source = SourceManifest::from_json(r#"{"name":"App"}"#).unwrap();
        let info = GenerationInfo::new("chrome", "app", &source).unwrap();

        let path = info.write(dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join(GENERATION_INFO_FILE));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["generatedBy"], GENERATOR_NAME);
        assert_eq!(value["platform"], "chrome");
        assert_eq!(value["packageName"], "app");
        assert_eq!(
            value["sourceManifestSha256"],
            source.fingerprint().unwrap().as_str()
        );
        assert!(value["generatedAt"].is_string());
    }
}
