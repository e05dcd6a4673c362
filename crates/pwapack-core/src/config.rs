//! Configuration management for pwapack.
//!
//! Configuration is stored in TOML and layered as follows:
//!
//! 1. **Built-in defaults**: 30s fetch timeout, assets embedded in the binary
//! 2. **Config file**: `$PWAPACK_CONFIG`, or `config.toml` in the platform
//!    config directory
//! 3. **Environment variables**: `PWAPACK_ASSETS_DIR`,
//!    `PWAPACK_FETCH_TIMEOUT_SECS`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [fetch]
//! timeout_secs = 10
//! user_agent = "my-builder/1.0"
//!
//! [assets]
//! dir = "/opt/pwapack/assets"
//! ```
//!
//! ## Loading
//!
//! ```rust,no_run
//! use pwapack_core::Config;
//!
//! let config = Config::load()?;
//! println!("Assets: {:?}", config.assets.source());
//! println!("Timeout: {:?}", config.fetch.timeout());
//! # Ok::<(), pwapack_core::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::AssetSource;
use crate::{Error, Result};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "PWAPACK_CONFIG";
/// Environment variable overriding the assets directory.
pub const ASSETS_DIR_ENV: &str = "PWAPACK_ASSETS_DIR";
/// Environment variable overriding the icon fetch timeout.
pub const FETCH_TIMEOUT_ENV: &str = "PWAPACK_FETCH_TIMEOUT_SECS";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Icon download settings.
    pub fetch: FetchConfig,
    /// Location of bundled assets (default icon, documentation).
    pub assets: AssetsConfig,
}

/// Icon download settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with icon requests.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("pwapack/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Location of the fallback icon and platform documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Explicit assets directory; `None` uses the copies embedded in the binary.
    pub dir: Option<PathBuf>,
}

impl AssetsConfig {
    /// Where assets are read from.
    #[must_use]
    pub fn source(&self) -> AssetSource {
        self.dir
            .as_ref()
            .map_or(AssetSource::Bundled, |dir| AssetSource::Directory(dir.clone()))
    }
}

impl Config {
    /// Load configuration from the default location and apply environment
    /// overrides. A missing config file yields defaults.
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Load configuration from `path` without environment overrides.
    ///
    /// Returns defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Resolve the config file path: `$PWAPACK_CONFIG` first, then the
    /// platform config directory.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        ProjectDirs::from("dev", "pwapack", "pwapack")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply `PWAPACK_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup(ASSETS_DIR_ENV) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                self.assets.dir = Some(PathBuf::from(trimmed));
            }
        }

        if let Some(raw) = lookup(FETCH_TIMEOUT_ENV) {
            self.fetch.timeout_secs = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{FETCH_TIMEOUT_ENV} must be a whole number, got '{raw}'"))
            })?;
        }

        Ok(self)
    }
}
