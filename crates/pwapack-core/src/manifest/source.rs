//! W3C web app manifest model.

use std::collections::BTreeMap;
use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// A platform-agnostic web app manifest.
///
/// Only the members the generator reads are typed; everything else is kept in
/// [`extra`](Self::extra) so the fingerprint covers the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceManifest {
    /// Base URL of the app; relative icon paths resolve against it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,
    /// Full application name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short application name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Application description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Navigation scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Preferred display mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Preferred orientation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    /// Theme color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    /// Background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Primary language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Icon declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<ManifestIcon>,
    /// Members not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One entry of the manifest `icons` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    /// Icon path, relative to `start_url` or absolute.
    pub src: String,
    /// Space separated `WxH` sizes, e.g. `"48x48 96x96"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    /// MIME type hint.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl SourceManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::filesystem(path, e))?;
        Self::from_json(&content)
    }

    /// Icons as a size label -> path mapping.
    ///
    /// `"128x128"` yields the label `"128"`. An icon declaring several sizes
    /// contributes one label per size; when two icons claim the same label the
    /// first one wins. Sizes such as `"any"` and icons without sizes are skipped.
    #[must_use]
    pub fn icon_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for icon in &self.icons {
            let Some(sizes) = icon.sizes.as_deref() else {
                continue;
            };
            for size in sizes.split_whitespace() {
                if let Some(label) = size_label(size) {
                    map.entry(label.to_string())
                        .or_insert_with(|| icon.src.clone());
                }
            }
        }
        map
    }

    /// SHA-256 of the manifest's JSON serialization, base64 encoded.
    ///
    /// Member order is fixed by the struct layout and the sorted `extra` map,
    /// so equal manifests always produce equal fingerprints.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&bytes);
        Ok(STANDARD.encode(digest))
    }
}

fn size_label(size: &str) -> Option<&str> {
    let (width, height) = size.split_once(['x', 'X'])?;
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    (numeric(width) && numeric(height)).then_some(width)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn icon(src: &str, sizes: Option<&str>) -> ManifestIcon {
        ManifestIcon {
            src: src.to_string(),
            sizes: sizes.map(str::to_string),
            mime_type: None,
        }
    }

    #[test]
    fn test_from_json_keeps_unknown_members() {
        let manifest = SourceManifest::from_json(
            r#"{"name":"App","start_url":"https://example.com/","categories":["games"]}"#,
        )
        .unwrap();

        assert_eq!(manifest.name.as_deref(), Some("App"));
        assert_eq!(manifest.start_url.as_deref(), Some("https://example.com/"));
        assert_eq!(
            manifest.extra.get("categories"),
            Some(&serde_json::json!(["games"]))
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = SourceManifest::from_json("not a manifest").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SourceManifest::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[test]
    fn test_icon_map_labels() {
        let manifest = SourceManifest {
            icons: vec![
                icon("/a.png", Some("48x48 96X96")),
                icon("/b.png", Some("128x128")),
                icon("/c.svg", Some("any")),
                icon("/d.png", None),
            ],
            ..SourceManifest::default()
        };

        let map = manifest.icon_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["48"], "/a.png");
        assert_eq!(map["96"], "/a.png");
        assert_eq!(map["128"], "/b.png");
    }

    #[test]
    fn test_icon_map_first_entry_wins() {
        let manifest = SourceManifest {
            icons: vec![
                icon("/first.png", Some("128x128")),
                icon("/second.png", Some("128x128")),
            ],
            ..SourceManifest::default()
        };

        assert_eq!(manifest.icon_map()["128"], "/first.png");
    }

    #[test]
    fn test_size_label_rejects_malformed() {
        assert_eq!(size_label("128x128"), Some("128"));
        assert_eq!(size_label("x128"), None);
        assert_eq!(size_label("128x"), None);
        assert_eq!(size_label("big"), None);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let json = r#"{"name":"App","start_url":"https://example.com/","zeta":1,"alpha":2}"#;
        let a = SourceManifest::from_json(json).unwrap();
        let b = SourceManifest::from_json(json).unwrap();

        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        let mut changed = a.clone();
        changed.name = Some("Other".to_string());
        assert_ne!(a.fingerprint().unwrap(), changed.fingerprint().unwrap());
    }
}
