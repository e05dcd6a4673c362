//! Target platforms.
//!
//! A [`Platform`] turns a source manifest into a package for one target.
//! Platforms do not share a base type; each one composes the collaborators
//! it needs (translator, icon fetcher, manifest writer) with the shared
//! [`PlatformSupport`] helpers and hands them to a
//! [`GenerationPipeline`](crate::GenerationPipeline).
//!
//! ```rust,no_run
//! use pwapack_core::platform::{self, Platform};
//! use pwapack_core::{Config, GenerationOptions, SourceManifest};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let platform = platform::create_platform("chrome", &Config::default())?;
//! let manifest = SourceManifest::from_path(Path::new("manifest.json"))?;
//! let options = GenerationOptions::for_manifest(&manifest);
//!
//! match platform.create(&manifest, Path::new("out"), &options).await {
//!     Ok(outcome) => println!("{} icons skipped", outcome.warnings.len()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # Ok(())
//! # }
//! ```

mod chrome;
mod support;

use std::path::Path;

use async_trait::async_trait;

pub use chrome::{ChromePlatform, ChromeTranslator};
pub use support::{DEFAULT_ICON_FILE, DEFAULT_ICON_SIZE, DOCS_DIR, PlatformSupport};

use crate::manifest::SourceManifest;
use crate::pipeline::{GenerationOptions, GenerationOutcome};
use crate::{Config, Error, PipelineError, Result};

/// Capability interface every target platform implements.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Short identifier, also the package directory name (e.g. `chrome`).
    fn id(&self) -> &'static str;

    /// Human readable name used in messages (e.g. `Chrome`).
    fn name(&self) -> &'static str;

    /// Generate the package for `source` under `root_dir/<id>`.
    async fn create(
        &self,
        source: &SourceManifest,
        root_dir: &Path,
        options: &GenerationOptions,
    ) -> std::result::Result<GenerationOutcome, PipelineError>;
}

/// Registered platforms as `(id, name)` pairs.
pub const PLATFORMS: &[(&str, &str)] = &[(chrome::PLATFORM_ID, chrome::PLATFORM_NAME)];

/// Build the platform registered under `id`.
pub fn create_platform(id: &str, config: &Config) -> Result<Box<dyn Platform>> {
    match id.trim().to_ascii_lowercase().as_str() {
        chrome::PLATFORM_ID => Ok(Box::new(ChromePlatform::from_config(config)?)),
        other => Err(Error::Config(format!(
            "Unknown platform '{other}'. Available: {}",
            PLATFORMS
                .iter()
                .map(|(id, _)| *id)
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}
