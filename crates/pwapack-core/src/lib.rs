//! # pwapack-core
//!
//! Core functionality for pwapack - turns a W3C web app manifest into a
//! self-contained, platform-specific app package on disk.
//!
//! ## Architecture
//!
//! The crate is organized around the generation pipeline and the
//! collaborators it drives:
//!
//! - **Manifest**: the source (W3C) and target (platform) manifest models,
//!   plus the translator and writer seams
//! - **Icons**: URL resolution and the concurrent, failure-isolated fetch stage
//! - **File tools**: directory creation and asset copying
//! - **Pipeline**: the ordered state machine that produces one outcome per run
//! - **Platform**: the capability interface each target platform implements
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pwapack_core::platform::{ChromePlatform, Platform};
//! use pwapack_core::{Config, GenerationOptions, SourceManifest};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let manifest = SourceManifest::from_path(Path::new("manifest.json"))?;
//! let platform = ChromePlatform::from_config(&config)?;
//!
//! let outcome = platform
//!     .create(&manifest, Path::new("out"), &GenerationOptions::new("my-app"))
//!     .await?;
//!
//! for warning in &outcome.warnings {
//!     eprintln!("skipped icon {}: {}", warning.size, warning.reason);
//! }
//! # Ok(())
//! # }
//! ```

/// Embedded fallback icon and platform documentation
pub mod assets;
/// Configuration loading and environment overrides
pub mod config;
/// Error types and result aliases
pub mod error;
/// Async filesystem helpers used by the pipeline
pub mod file_tools;
/// Generation metadata record
pub mod generation_info;
/// Icon URL resolution and concurrent acquisition
pub mod icons;
/// Source and target manifest models
pub mod manifest;
/// Generation pipeline and outcome types
pub mod pipeline;
/// Target platform implementations
pub mod platform;

pub use assets::AssetSource;
pub use config::{AssetsConfig, Config, FetchConfig};
pub use error::{Error, FetchError, PipelineError, Result};
pub use generation_info::GenerationInfo;
pub use icons::{HttpIconFetcher, IconFetcher, IconTask, IconWarning};
pub use manifest::{
    JsonManifestWriter, ManifestTranslator, ManifestWriter, SourceManifest, TargetManifest,
};
pub use pipeline::{GenerationOptions, GenerationOutcome, GenerationPipeline, PipelineState};
