//! The generation pipeline.
//!
//! A run walks a fixed, forward-only sequence of states:
//!
//! ```text
//! Idle -> Translating -> PreparingDirectory -> AcquiringIcons -> CopyingAssets
//!      -> WritingMetadata -> PersistingManifest -> Done
//! ```
//!
//! Any fatal error moves the run to `Failed`. The underlying error is logged
//! and the caller receives a [`PipelineError`] naming only the platform and
//! the failing stage. Icon download failures are not fatal; they are returned
//! as warnings on the [`GenerationOutcome`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{Instrument, debug, error, info, info_span};

use crate::icons::{self, IconFetcher, IconWarning, ProgressCallback};
use crate::manifest::{
    JsonManifestWriter, ManifestTranslator, ManifestWriter, SourceManifest,
};
use crate::platform::PlatformSupport;
use crate::{PipelineError, Result, file_tools};

/// File name of the persisted platform manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// States of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PipelineState {
    /// Not started.
    Idle,
    /// Converting the source manifest.
    Translating,
    /// Creating the package directory.
    PreparingDirectory,
    /// Downloading icons.
    AcquiringIcons,
    /// Copying the fallback icon and documentation.
    CopyingAssets,
    /// Writing the generation metadata record.
    WritingMetadata,
    /// Writing `manifest.json`.
    PersistingManifest,
    /// Finished successfully.
    Done,
    /// Aborted by a fatal error.
    Failed,
}

impl PipelineState {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// The state that follows this one on success.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Translating),
            Self::Translating => Some(Self::PreparingDirectory),
            Self::PreparingDirectory => Some(Self::AcquiringIcons),
            Self::AcquiringIcons => Some(Self::CopyingAssets),
            Self::CopyingAssets => Some(Self::WritingMetadata),
            Self::WritingMetadata => Some(Self::PersistingManifest),
            Self::PersistingManifest => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Translating => "translating",
            Self::PreparingDirectory => "preparing directory",
            Self::AcquiringIcons => "acquiring icons",
            Self::CopyingAssets => "copying assets",
            Self::WritingMetadata => "writing metadata",
            Self::PersistingManifest => "persisting manifest",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Per-run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Identity of the generated package.
    pub package_name: String,
}

impl GenerationOptions {
    /// Options with an explicit package name (sanitized).
    pub fn new(package_name: &str) -> Self {
        Self {
            package_name: sanitize_package_name(package_name),
        }
    }

    /// Options deriving the package name from the manifest's `short_name`
    /// or `name`.
    #[must_use]
    pub fn for_manifest(source: &SourceManifest) -> Self {
        let name = source
            .short_name
            .as_deref()
            .or(source.name.as_deref())
            .unwrap_or_default();
        Self::new(name)
    }
}

/// Lowercase, dash-separated package identifier. Falls back to `app`.
///
/// ```rust
/// use pwapack_core::pipeline::sanitize_package_name;
///
/// assert_eq!(sanitize_package_name("My Cool App!"), "my-cool-app");
/// assert_eq!(sanitize_package_name("***"), "app");
/// ```
#[must_use]
pub fn sanitize_package_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "app".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Successful result of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// Platform id.
    pub platform: String,
    /// Platform display name.
    pub platform_name: String,
    /// Package directory (`<root>/<platform id>`).
    pub package_dir: PathBuf,
    /// Path of the persisted manifest.
    pub manifest_path: PathBuf,
    /// Number of icons downloaded.
    pub icons_saved: usize,
    /// Icons that could not be retrieved.
    pub warnings: Vec<IconWarning>,
}

impl GenerationOutcome {
    /// Whether any icon was skipped.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Ordered generation workflow for one platform.
///
/// Collaborators are injected so platforms can swap the translator or
/// fetcher, and tests can observe them.
pub struct GenerationPipeline {
    platform_id: &'static str,
    platform_name: &'static str,
    translator: Arc<dyn ManifestTranslator>,
    fetcher: Arc<dyn IconFetcher>,
    writer: Arc<dyn ManifestWriter>,
    support: PlatformSupport,
    progress_callback: Option<ProgressCallback>,
}

impl GenerationPipeline {
    /// Create a pipeline writing manifests as JSON.
    pub fn new(
        platform_id: &'static str,
        platform_name: &'static str,
        translator: Arc<dyn ManifestTranslator>,
        fetcher: Arc<dyn IconFetcher>,
        support: PlatformSupport,
    ) -> Self {
        Self {
            platform_id,
            platform_name,
            translator,
            fetcher,
            writer: Arc::new(JsonManifestWriter),
            support,
            progress_callback: None,
        }
    }

    /// Replace the manifest writer.
    #[must_use]
    pub fn with_writer(mut self, writer: Arc<dyn ManifestWriter>) -> Self {
        self.writer = writer;
        self
    }

    /// Set progress callback for icon settlements.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Run the pipeline and report exactly one outcome.
    pub async fn run(
        &self,
        source: &SourceManifest,
        root_dir: &Path,
        options: &GenerationOptions,
    ) -> std::result::Result<GenerationOutcome, PipelineError> {
        let span = info_span!(
            "generate",
            platform = self.platform_id,
            package = %options.package_name
        );

        let mut state = PipelineState::Idle;
        let result = self
            .execute(source, root_dir, options, &mut state)
            .instrument(span.clone())
            .await;

        let _entered = span.enter();
        match result {
            Ok(outcome) => {
                info!("The {} app was created successfully!", self.platform_name);
                Ok(outcome)
            },
            Err(err) => {
                error!(
                    category = err.category(),
                    stage = %state,
                    "{err}"
                );
                let failed_in = state;
                transition(&mut state, PipelineState::Failed);
                Err(PipelineError::new(self.platform_name, failed_in))
            },
        }
    }

    async fn execute(
        &self,
        source: &SourceManifest,
        root_dir: &Path,
        options: &GenerationOptions,
        state: &mut PipelineState,
    ) -> Result<GenerationOutcome> {
        info!("Generating the {} app...", self.platform_name);

        advance(state);
        let target = self.translator.translate(source).await?;

        advance(state);
        let package_dir = root_dir.join(self.platform_id);
        debug!("Creating the {} app folder...", self.platform_name);
        file_tools::ensure_directory(&package_dir).await?;

        advance(state);
        debug!("Downloading the {} icons...", self.platform_name);
        let report = icons::acquire_icons(
            self.fetcher.as_ref(),
            &target.icons,
            source.start_url.as_deref(),
            &package_dir,
            self.progress_callback.as_ref(),
        )
        .await;

        advance(state);
        self.support.copy_default_icon(&package_dir).await?;
        self.support.copy_documentation(&package_dir).await?;

        advance(state);
        self.support
            .write_generation_info(source, &options.package_name, &package_dir)
            .await?;

        advance(state);
        debug!("Copying the {} manifest to the app folder...", self.platform_name);
        let manifest_path = package_dir.join(MANIFEST_FILE);
        self.writer.write_manifest(&target, &manifest_path).await?;

        advance(state);
        Ok(GenerationOutcome {
            platform: self.platform_id.to_string(),
            platform_name: self.platform_name.to_string(),
            package_dir,
            manifest_path,
            icons_saved: report.saved.len(),
            warnings: report.warnings,
        })
    }
}

fn advance(state: &mut PipelineState) {
    if let Some(next) = state.next() {
        transition(state, next);
    }
}

fn transition(state: &mut PipelineState, next: PipelineState) {
    debug!(from = %state, to = %next, "pipeline transition");
    *state = next;
}
