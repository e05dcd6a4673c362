#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{pwapack_cmd, write_manifest};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

const NO_ICONS: &str = r#"{
    "name": "Example Application",
    "short_name": "Example",
    "start_url": "https://example.com/app/"
}"#;

#[test]
fn generate_writes_package_without_icons() {
    let tmp = tempdir().unwrap();
    let manifest = write_manifest(tmp.path(), NO_ICONS);
    let out = tmp.path().join("out");

    pwapack_cmd(tmp.path())
        .arg("generate")
        .arg(&manifest)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The Chrome app was created successfully!",
        ));

    let package = out.join("chrome");
    assert!(package.join("manifest.json").is_file());
    assert!(package.join("generationInfo.json").is_file());
    assert!(package.join("images").join("default-icon-128.png").is_file());
    assert!(package.join("docs").join("README.md").is_file());

    let written: Value =
        serde_json::from_slice(&std::fs::read(package.join("manifest.json")).unwrap()).unwrap();
    assert_eq!(written["name"], "Example");
    assert_eq!(written["app"]["launch"]["web_url"], "https://example.com/app/");

    let info: Value =
        serde_json::from_slice(&std::fs::read(package.join("generationInfo.json")).unwrap())
            .unwrap();
    assert_eq!(info["packageName"], "example");
    assert_eq!(info["platform"], "chrome");
}

#[test]
fn generate_json_output_reports_outcome() {
    let tmp = tempdir().unwrap();
    let manifest = write_manifest(tmp.path(), NO_ICONS);
    let out = tmp.path().join("out");

    let stdout = pwapack_cmd(tmp.path())
        .args(["generate", "--format", "json", "--package-name", "My Pkg"])
        .arg(&manifest)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(payload["platform"], "chrome");
    assert_eq!(payload["platformName"], "Chrome");
    assert_eq!(payload["iconsSaved"], 0);
    assert_eq!(payload["warnings"], Value::Array(Vec::new()));

    let info: Value = serde_json::from_slice(
        &std::fs::read(out.join("chrome").join("generationInfo.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(info["packageName"], "my-pkg");
}

#[test]
fn generate_reports_skipped_icons_and_still_succeeds() {
    let tmp = tempdir().unwrap();
    // Nothing listens on port 1, so the download fails fast.
    let manifest = write_manifest(
        tmp.path(),
        r#"{
            "name": "Example",
            "start_url": "http://127.0.0.1:1/",
            "icons": [{ "src": "/icons/icon-48.png", "sizes": "48x48" }]
        }"#,
    );
    let out = tmp.path().join("out");

    pwapack_cmd(tmp.path())
        .arg("generate")
        .arg(&manifest)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("created successfully"))
        .stdout(predicate::str::contains("skipped icon 48"));

    let package = out.join("chrome");
    assert!(!package.join("icons").join("icon-48.png").exists());
    assert!(package.join("manifest.json").is_file());
}

#[test]
fn generate_fails_when_output_is_a_file() {
    let tmp = tempdir().unwrap();
    let manifest = write_manifest(tmp.path(), NO_ICONS);
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    pwapack_cmd(tmp.path())
        .arg("generate")
        .arg(&manifest)
        .arg("-o")
        .arg(&blocker)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "There was an error creating the Chrome app.",
        ));
}

#[test]
fn generate_json_failure_names_the_stage() {
    let tmp = tempdir().unwrap();
    let manifest = write_manifest(tmp.path(), r#"{"name": "No Start"}"#);

    let stdout = pwapack_cmd(tmp.path())
        .args(["generate", "--format", "json"])
        .arg(&manifest)
        .arg("-o")
        .arg(tmp.path().join("out"))
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(payload["error"], "There was an error creating the Chrome app.");
    assert_eq!(payload["stage"], "translating");
    assert!(!tmp.path().join("out").join("chrome").exists());
}

#[test]
fn generate_rejects_unknown_platform() {
    let tmp = tempdir().unwrap();
    let manifest = write_manifest(tmp.path(), NO_ICONS);

    pwapack_cmd(tmp.path())
        .args(["generate", "--platform", "windows10"])
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown platform 'windows10'"));
}

#[test]
fn generate_honors_assets_dir_override() {
    let tmp = tempdir().unwrap();
    let manifest = write_manifest(tmp.path(), NO_ICONS);
    let empty_assets = tmp.path().join("assets");
    std::fs::create_dir_all(&empty_assets).unwrap();

    pwapack_cmd(tmp.path())
        .arg("generate")
        .arg(&manifest)
        .arg("-o")
        .arg(tmp.path().join("out"))
        .arg("--assets-dir")
        .arg(&empty_assets)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("There was an error creating the Chrome app."));
}
