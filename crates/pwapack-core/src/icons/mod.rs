//! Icon URL resolution and concurrent, failure-isolated acquisition.
//!
//! Every icon of the translated manifest becomes an [`IconTask`]: the
//! absolute URL it is fetched from and the file it is saved to. Tasks sharing
//! a destination are fetched once, every distinct file is fetched at the same
//! time, and the stage waits for all of them to settle. A failed task turns
//! into an [`IconWarning`]; it never fails the stage.
//!
//! ## Path resolution
//!
//! The fetch URL is anchored at the *source* manifest's `start_url`. The
//! destination is derived from the URL path of the icon value itself, so
//! query strings are dropped and the path keeps its percent-encoded form:
//!
//! ```rust
//! use pwapack_core::IconTask;
//! use std::path::Path;
//!
//! let task = IconTask::resolve(
//!     "128",
//!     "/icons/my icon.png?v=2",
//!     Some("https://example.com/app/"),
//!     Path::new("out/chrome"),
//! )?;
//!
//! assert_eq!(task.url.as_str(), "https://example.com/icons/my%20icon.png?v=2");
//! assert_eq!(task.destination, Path::new("out/chrome/icons/my%20icon.png"));
//! # Ok::<(), pwapack_core::FetchError>(())
//! ```

mod fetcher;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

pub use fetcher::{HttpIconFetcher, IconFetcher};

use crate::FetchError;

/// Base used to parse relative icon values on their own.
const ICON_PATH_BASE: &str = "http://icon.invalid/";

/// Progress callback type for icon settlements.
///
/// Called with `(settled, total)` once per icon, whether it succeeded or not.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// One icon download: where it comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTask {
    /// Size label from the manifest icon map.
    pub size: String,
    /// Absolute URL the icon is fetched from.
    pub url: Url,
    /// File the icon is written to.
    pub destination: PathBuf,
}

impl IconTask {
    /// Resolve an icon map entry against the manifest base URL and the
    /// package directory.
    pub fn resolve(
        size: &str,
        icon_path: &str,
        base_url: Option<&str>,
        package_dir: &Path,
    ) -> Result<Self, FetchError> {
        let invalid = |reason: String| FetchError::InvalidUrl {
            url: icon_path.to_string(),
            reason,
        };

        let url = match base_url {
            Some(base) => Url::parse(base)
                .and_then(|base| base.join(icon_path))
                .map_err(|e| invalid(e.to_string()))?,
            None => Url::parse(icon_path).map_err(|e| invalid(e.to_string()))?,
        };

        Ok(Self {
            size: size.to_string(),
            url,
            destination: destination_for(icon_path, package_dir)?,
        })
    }
}

/// Package-relative destination of an icon, from the icon value's URL path.
///
/// Dot segments are resolved by the URL parser, so the result never escapes
/// `package_dir`.
pub fn destination_for(icon_path: &str, package_dir: &Path) -> Result<PathBuf, FetchError> {
    let parsed = Url::parse(ICON_PATH_BASE)
        .and_then(|base| base.join(icon_path))
        .map_err(|e| FetchError::InvalidUrl {
            url: icon_path.to_string(),
            reason: e.to_string(),
        })?;

    let mut destination = package_dir.to_path_buf();
    let mut has_file = false;
    for segment in parsed
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
    {
        destination.push(segment);
        has_file = true;
    }

    if has_file {
        Ok(destination)
    } else {
        Err(FetchError::InvalidUrl {
            url: icon_path.to_string(),
            reason: "icon path has no file component".to_string(),
        })
    }
}

/// An icon that could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconWarning {
    /// Size label of the icon.
    pub size: String,
    /// Resolved URL, or the raw manifest value when resolution failed.
    pub url: String,
    /// Why the icon was skipped.
    pub reason: String,
}

/// Aggregated result of the icon stage.
#[derive(Debug, Default)]
pub struct IconReport {
    /// Distinct files written.
    pub saved: Vec<PathBuf>,
    /// Size entries that were skipped.
    pub warnings: Vec<IconWarning>,
    /// Size entries that settled, successful or not.
    pub settled: usize,
}

/// Size entries sharing one destination file.
struct Download<'a> {
    destination: PathBuf,
    entries: Vec<(&'a str, Url)>,
}

/// Fetch every icon in `icons` concurrently and wait for all of them.
///
/// Entries whose values resolve to the same destination (one image declaring
/// several sizes) are fetched once; each entry still settles and warns on its
/// own. Never fails: each error is logged and recorded as a warning. An empty
/// map returns immediately without touching the fetcher.
pub async fn acquire_icons(
    fetcher: &dyn IconFetcher,
    icons: &BTreeMap<String, String>,
    base_url: Option<&str>,
    package_dir: &Path,
    progress: Option<&ProgressCallback>,
) -> IconReport {
    if icons.is_empty() {
        debug!("No icons to download");
        return IconReport::default();
    }

    let total = icons.len();
    let settled = AtomicUsize::new(0);
    let settle = || {
        let done = settled.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(cb) = progress {
            cb(done, total);
        }
    };

    let mut report = IconReport::default();
    let mut downloads: Vec<Download<'_>> = Vec::new();
    for (size, icon_path) in icons {
        match IconTask::resolve(size, icon_path, base_url, package_dir) {
            Ok(task) => {
                match downloads
                    .iter_mut()
                    .find(|d| d.destination == task.destination)
                {
                    Some(download) => download.entries.push((size.as_str(), task.url)),
                    None => downloads.push(Download {
                        destination: task.destination,
                        entries: vec![(size.as_str(), task.url)],
                    }),
                }
            },
            Err(err) => {
                settle();
                warn!("Error downloading icon {size} from {icon_path}. {err}");
                report.warnings.push(IconWarning {
                    size: size.clone(),
                    url: icon_path.clone(),
                    reason: err.to_string(),
                });
            },
        }
    }

    let fetches = downloads.into_iter().map(|download| {
        let settle = &settle;
        async move {
            let (_, url) = &download.entries[0];
            let result = fetcher.fetch_icon(url, &download.destination).await;
            for _ in &download.entries {
                settle();
            }
            (download, result)
        }
    });

    for (download, result) in join_all(fetches).await {
        match result {
            Ok(()) => {
                for (size, _) in &download.entries {
                    debug!("Saved icon {size} to {}", download.destination.display());
                }
                report.saved.push(download.destination);
            },
            Err(err) => {
                let reason = err.to_string();
                for (size, url) in download.entries {
                    warn!("Error downloading icon {size} from {url}. {reason}");
                    report.warnings.push(IconWarning {
                        size: size.to_string(),
                        url: url.to_string(),
                        reason: reason.clone(),
                    });
                }
            },
        }
    }

    report.settled = settled.load(Ordering::SeqCst);
    report
}
