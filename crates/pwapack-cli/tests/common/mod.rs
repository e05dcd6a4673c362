#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a `pwapack` command isolated from the user's config and colors.
#[allow(dead_code)]
pub fn pwapack_cmd(scratch: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pwapack"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("PWAPACK_CONFIG", scratch.join("no-such-config.toml"));
    cmd.env_remove("PWAPACK_ASSETS_DIR");
    cmd.env_remove("PWAPACK_FETCH_TIMEOUT_SECS");
    cmd.env("NO_COLOR", "1");
    cmd.current_dir(scratch);
    cmd
}

/// Write `json` as `manifest.json` under `dir`.
#[allow(dead_code)]
pub fn write_manifest(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("manifest.json");
    std::fs::write(&path, json).expect("write manifest");
    path
}
