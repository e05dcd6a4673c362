//! Manifest models and the collaborator seams around them.
//!
//! ## Key Types
//!
//! - [`SourceManifest`]: the platform-agnostic W3C web app manifest given as
//!   input
//! - [`TargetManifest`]: the platform manifest produced by translation and
//!   persisted as `manifest.json`
//! - [`ManifestTranslator`]: converts a source manifest for one platform
//! - [`ManifestWriter`]: persists a target manifest to disk
//!
//! ## Example
//!
//! ```rust
//! use pwapack_core::SourceManifest;
//!
//! let manifest = SourceManifest::from_json(r#"{
//!     "name": "Example",
//!     "start_url": "https://example.com/",
//!     "icons": [{ "src": "/icons/128.png", "sizes": "128x128" }]
//! }"#)?;
//!
//! let icons = manifest.icon_map();
//! assert_eq!(icons.get("128").map(String::as_str), Some("/icons/128.png"));
//! # Ok::<(), pwapack_core::Error>(())
//! ```

mod source;
mod target;
mod writer;

use async_trait::async_trait;

pub use source::{ManifestIcon, SourceManifest};
pub use target::{AppLaunch, AppSection, TargetManifest};
pub use writer::{JsonManifestWriter, ManifestWriter};

use crate::Result;

/// Converts a source manifest into a platform manifest.
///
/// Implementations fail with [`Error::Translation`](crate::Error::Translation)
/// when the source is structurally invalid for their platform.
#[async_trait]
pub trait ManifestTranslator: Send + Sync {
    /// Translate `source` into the platform representation.
    async fn translate(&self, source: &SourceManifest) -> Result<TargetManifest>;
}
