//! Chrome hosted app platform.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::{Platform, PlatformSupport};
use crate::assets::AssetSource;
use crate::icons::{HttpIconFetcher, IconFetcher, ProgressCallback};
use crate::manifest::{AppLaunch, AppSection, ManifestTranslator, SourceManifest, TargetManifest};
use crate::pipeline::{GenerationOptions, GenerationOutcome, GenerationPipeline};
use crate::{Config, Error, PipelineError, Result};

pub(super) const PLATFORM_ID: &str = "chrome";
pub(super) const PLATFORM_NAME: &str = "Chrome";

const MAX_NAME_CHARS: usize = 45;
const MAX_DESCRIPTION_CHARS: usize = 132;
const DEFAULT_VERSION: &str = "0.0.1";
const DEFAULT_PERMISSIONS: &[&str] = &["unlimitedStorage", "notifications"];

/// Translates W3C manifests into Chrome hosted app manifests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTranslator;

#[async_trait]
impl ManifestTranslator for ChromeTranslator {
    async fn translate(&self, source: &SourceManifest) -> Result<TargetManifest> {
        let start_url = non_blank(source.start_url.as_deref()).ok_or_else(|| {
            Error::Translation("the manifest has no start_url".to_string())
        })?;
        Url::parse(start_url).map_err(|e| {
            Error::Translation(format!("start_url '{start_url}' is not an absolute URL: {e}"))
        })?;

        let name = non_blank(source.short_name.as_deref())
            .or_else(|| non_blank(source.name.as_deref()))
            .ok_or_else(|| {
                Error::Translation("the manifest has neither name nor short_name".to_string())
            })?;
        let description = non_blank(source.description.as_deref())
            .or_else(|| non_blank(source.name.as_deref()))
            .unwrap_or(name);

        Ok(TargetManifest {
            manifest_version: 2,
            name: truncate_chars(name, MAX_NAME_CHARS),
            description: truncate_chars(description, MAX_DESCRIPTION_CHARS),
            version: DEFAULT_VERSION.to_string(),
            icons: source.icon_map(),
            app: AppSection {
                launch: AppLaunch {
                    web_url: start_url.to_string(),
                },
                urls: non_blank(source.scope.as_deref())
                    .map(|scope| vec![scope.to_string()])
                    .unwrap_or_default(),
            },
            permissions: DEFAULT_PERMISSIONS.iter().map(|p| (*p).to_string()).collect(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Chrome hosted app generator.
pub struct ChromePlatform {
    pipeline: GenerationPipeline,
}

impl ChromePlatform {
    /// Build with an HTTP icon fetcher and asset source from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpIconFetcher::from_config(&config.fetch)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), config.assets.source()))
    }

    /// Build with a custom icon fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn IconFetcher>, assets: impl Into<AssetSource>) -> Self {
        let pipeline = GenerationPipeline::new(
            PLATFORM_ID,
            PLATFORM_NAME,
            Arc::new(ChromeTranslator),
            fetcher,
            PlatformSupport::new(PLATFORM_ID, assets),
        );
        Self { pipeline }
    }

    /// Observe icon settlements as `(settled, total)`.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.pipeline = self.pipeline.with_progress(callback);
        self
    }
}

#[async_trait]
impl Platform for ChromePlatform {
    fn id(&self) -> &'static str {
        PLATFORM_ID
    }

    fn name(&self) -> &'static str {
        PLATFORM_NAME
    }

    async fn create(
        &self,
        source: &SourceManifest,
        root_dir: &Path,
        options: &GenerationOptions,
    ) -> std::result::Result<GenerationOutcome, PipelineError> {
        self.pipeline.run(source, root_dir, options).await
    }
}
