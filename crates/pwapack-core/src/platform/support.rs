//! Helpers shared by every platform: default icon, documentation and
//! generation metadata.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::assets::{self, AssetSource};
use crate::generation_info::GenerationInfo;
use crate::manifest::SourceManifest;
use crate::{Error, Result, file_tools};

/// Size label of the fallback icon.
pub const DEFAULT_ICON_SIZE: &str = "128";
/// File name of the fallback icon, both in the assets and in the package.
pub const DEFAULT_ICON_FILE: &str = "default-icon-128.png";
/// Directory documentation is copied into, relative to the package.
pub const DOCS_DIR: &str = "docs";

/// Shared package helpers bound to one platform and one asset source.
#[derive(Debug, Clone)]
pub struct PlatformSupport {
    platform_id: String,
    assets: AssetSource,
}

impl PlatformSupport {
    /// Helpers for `platform_id` reading assets from `assets`.
    pub fn new(platform_id: impl Into<String>, assets: impl Into<AssetSource>) -> Self {
        Self {
            platform_id: platform_id.into(),
            assets: assets.into(),
        }
    }

    /// Platform this helper is bound to.
    #[must_use]
    pub fn platform_id(&self) -> &str {
        &self.platform_id
    }

    /// Copy the fallback icon to `<package>/images/`.
    pub async fn copy_default_icon(&self, package_dir: &Path) -> Result<PathBuf> {
        let dst = package_dir.join("images").join(DEFAULT_ICON_FILE);
        match &self.assets {
            AssetSource::Bundled => file_tools::write_file(&dst, assets::DEFAULT_ICON_PNG).await?,
            AssetSource::Directory(dir) => {
                let src = dir.join("images").join(DEFAULT_ICON_FILE);
                file_tools::copy_file(&src, &dst).await?;
            },
        }
        debug!("Copied default {DEFAULT_ICON_SIZE} icon to {}", dst.display());
        Ok(dst)
    }

    /// Copy the platform documentation to `<package>/docs/`.
    ///
    /// Returns the number of files written.
    pub async fn copy_documentation(&self, package_dir: &Path) -> Result<usize> {
        let dst = package_dir.join(DOCS_DIR);
        match &self.assets {
            AssetSource::Directory(dir) => {
                file_tools::copy_tree(&dir.join("docs").join(&self.platform_id), &dst).await
            },
            AssetSource::Bundled => {
                let docs = assets::bundled_docs(&self.platform_id).ok_or_else(|| {
                    Error::filesystem(
                        Path::new("docs").join(&self.platform_id),
                        std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "no bundled documentation for this platform",
                        ),
                    )
                })?;
                for (name, contents) in docs {
                    file_tools::write_file(&dst.join(name), contents.as_bytes()).await?;
                }
                debug!("Wrote {} bundled docs to {}", docs.len(), dst.display());
                Ok(docs.len())
            },
        }
    }

    /// Write the generation metadata record into the package.
    pub async fn write_generation_info(
        &self,
        source: &SourceManifest,
        package_name: &str,
        package_dir: &Path,
    ) -> Result<PathBuf> {
        GenerationInfo::new(&self.platform_id, package_name, source)?
            .write(package_dir)
            .await
    }
}
