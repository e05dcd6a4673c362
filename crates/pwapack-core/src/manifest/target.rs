//! Platform manifest model (Chrome app manifest shape).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Platform-specific manifest produced by translation.
///
/// Icons use a sorted map so the serialized `manifest.json` is byte-stable
/// across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetManifest {
    /// Manifest format version.
    pub manifest_version: u8,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Package version.
    pub version: String,
    /// Size label -> icon path, as written in the source manifest.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub icons: BTreeMap<String, String>,
    /// Hosted app launch information.
    pub app: AppSection,
    /// Requested permissions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

/// The `app` member of a hosted app manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSection {
    /// Where the app starts.
    pub launch: AppLaunch,
    /// URLs that belong to the app.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
}

/// Launch target of a hosted app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppLaunch {
    /// Start URL.
    pub web_url: String,
}
