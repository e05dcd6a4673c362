//! Error types for pwapack-core operations.
//!
//! Errors fall into two groups with very different propagation rules:
//!
//! - **Fatal** ([`Error`]): translation, filesystem, serialization and
//!   configuration failures. Any of these aborts the generation pipeline.
//! - **Non-fatal** ([`FetchError`]): a single icon could not be retrieved.
//!   These are downgraded to warnings inside the icon stage and never escape
//!   it.
//!
//! The pipeline never hands a fatal [`Error`] to its caller directly. It logs
//! the detail and returns a [`PipelineError`] instead, which only names the
//! platform and the stage that failed:
//!
//! ```rust
//! use pwapack_core::{PipelineError, PipelineState};
//!
//! let err = PipelineError::new("Chrome", PipelineState::CopyingAssets);
//! assert_eq!(err.to_string(), "There was an error creating the Chrome app.");
//! assert_eq!(err.stage(), PipelineState::CopyingAssets);
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::pipeline::PipelineState;

/// The main error type for pwapack-core operations.
///
/// `Display` gives a short, user-facing message; the full chain is available
/// through `source()`.
#[derive(Error, Debug)]
pub enum Error {
    /// The source manifest cannot be translated for the target platform.
    ///
    /// ## Common Causes
    ///
    /// - Missing or relative `start_url`
    /// - Neither `name` nor `short_name` present
    #[error("Translation error: {0}")]
    Translation(String),

    /// A directory could not be created or a file could not be copied.
    ///
    /// The offending path is kept alongside the underlying I/O error so the
    /// log line points at the exact location.
    #[error("Filesystem error at '{}': {source}", path.display())]
    Filesystem {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Manifest or metadata serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Build a [`Error::Filesystem`] for `path`.
    pub fn filesystem(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Static category label, used as a structured logging field.
    ///
    /// ```rust
    /// use pwapack_core::Error;
    ///
    /// assert_eq!(Error::Translation("no start_url".into()).category(), "translation");
    /// assert_eq!(Error::Config("bad toml".into()).category(), "config");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Translation(_) => "translation",
            Self::Filesystem { .. } => "filesystem",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}

/// Result type alias for pwapack-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to retrieve a single icon.
///
/// Always non-fatal: the icon stage turns each one into an
/// [`IconWarning`](crate::IconWarning).
#[derive(Error, Debug)]
pub enum FetchError {
    /// The icon URL could not be resolved against the manifest base URL.
    #[error("invalid icon URL '{url}': {reason}")]
    InvalidUrl {
        /// The raw value that failed to resolve.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for '{url}'")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// The downloaded icon could not be written.
    #[error("could not write '{}': {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// The single caller-facing failure of a generation run.
///
/// Carries no detail from the underlying error; that detail only
/// goes to the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("There was an error creating the {platform} app.")]
pub struct PipelineError {
    platform: String,
    stage: PipelineState,
}

impl PipelineError {
    /// Create a pipeline error for `platform` that failed while in `stage`.
    pub fn new(platform: impl Into<String>, stage: PipelineState) -> Self {
        Self {
            platform: platform.into(),
            stage,
        }
    }

    /// Display name of the platform being generated.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Pipeline state that was active when the fatal error occurred.
    #[must_use]
    pub const fn stage(&self) -> PipelineState {
        self.stage
    }
}
