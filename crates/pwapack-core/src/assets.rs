//! Fallback icon and platform documentation.
//!
//! By default both are compiled into the binary, so a generated package
//! never depends on the source tree being present. An explicit directory
//! (`[assets] dir` or `PWAPACK_ASSETS_DIR`) replaces them and must follow the
//! same layout:
//!
//! ```text
//! <dir>/images/default-icon-128.png
//! <dir>/docs/<platform id>/...
//! ```

use std::path::{Path, PathBuf};

/// Bundled fallback icon.
pub const DEFAULT_ICON_PNG: &[u8] = include_bytes!("../assets/images/default-icon-128.png");

const CHROME_DOCS: &[(&str, &str)] = &[
    ("README.md", include_str!("../assets/docs/chrome/README.md")),
    ("publishing.md", include_str!("../assets/docs/chrome/publishing.md")),
];

/// Where the fallback icon and documentation are read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssetSource {
    /// Copies embedded in the binary.
    #[default]
    Bundled,
    /// A directory on disk.
    Directory(PathBuf),
}

impl From<PathBuf> for AssetSource {
    fn from(dir: PathBuf) -> Self {
        Self::Directory(dir)
    }
}

impl From<&Path> for AssetSource {
    fn from(dir: &Path) -> Self {
        Self::Directory(dir.to_path_buf())
    }
}

/// Bundled documentation for `platform_id` as `(relative path, contents)`.
#[must_use]
pub fn bundled_docs(platform_id: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match platform_id {
        "chrome" => Some(CHROME_DOCS),
        _ => None,
    }
}
