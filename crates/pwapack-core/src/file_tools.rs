//! Async filesystem helpers used by the generation pipeline.
//!
//! Every failure is reported as [`Error::Filesystem`] carrying the path the
//! operation was acting on.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::debug;

use crate::{Error, Result};

/// Create `path` and any missing parents.
///
/// Succeeds when the directory already exists. Fails when a component of the
/// path is a regular file or the directory cannot be created.
pub async fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| Error::filesystem(path, e))
}

/// Copy a single file, creating the destination's parent directory.
///
/// Returns the number of bytes copied.
pub async fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    if let Some(parent) = dst.parent() {
        ensure_directory(parent).await?;
    }
    let bytes = fs::copy(src, dst)
        .await
        .map_err(|e| Error::filesystem(src, e))?;
    debug!("Copied {} -> {} ({bytes} bytes)", src.display(), dst.display());
    Ok(bytes)
}

/// Write `contents` to `dst`, creating its parent directory.
pub async fn write_file(dst: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = dst.parent() {
        ensure_directory(parent).await?;
    }
    fs::write(dst, contents)
        .await
        .map_err(|e| Error::filesystem(dst, e))
}

/// Recursively copy the contents of `src` into `dst`.
///
/// `dst` is created if needed and existing files are overwritten. Returns the
/// number of files copied. A missing or non-directory `src` is an error.
pub async fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let metadata = fs::metadata(src)
        .await
        .map_err(|e| Error::filesystem(src, e))?;
    if !metadata.is_dir() {
        return Err(Error::filesystem(
            src,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let mut copied = 0;
    let mut pending: Vec<(PathBuf, PathBuf)> = vec![(src.to_path_buf(), dst.to_path_buf())];

    while let Some((from_dir, to_dir)) = pending.pop() {
        ensure_directory(&to_dir).await?;

        let mut entries = fs::read_dir(&from_dir)
            .await
            .map_err(|e| Error::filesystem(&from_dir, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::filesystem(&from_dir, e))?
        {
            let from = entry.path();
            let to = to_dir.join(entry.file_name());
            let is_dir = fs::metadata(&from)
                .await
                .map_err(|e| Error::filesystem(&from, e))?
                .is_dir();

            if is_dir {
                pending.push((from, to));
            } else {
                fs::copy(&from, &to)
                    .await
                    .map_err(|e| Error::filesystem(&from, e))?;
                copied += 1;
            }
        }
    }

    debug!(
        "Copied {copied} files from {} to {}",
        src.display(),
        dst.display()
    );
    Ok(copied)
}

/// Serialize `value` as pretty JSON (with a trailing newline) and write it
/// atomically through a sibling temp file.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| Error::filesystem(&tmp_path, e))?;

    #[cfg(target_os = "windows")]
    if fs::try_exists(path).await.unwrap_or(false) {
        fs::remove_file(path)
            .await
            .map_err(|e| Error::filesystem(path, e))?;
    }
    fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Error::filesystem(path, e))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_directory_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a/b/c");

        ensure_directory(&target).await.unwrap();
        ensure_directory(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_ensure_directory_fails_on_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        let err = ensure_directory(&file).await.unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));

        let err = ensure_directory(&file.join("child")).await.unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[tokio::test]
    async fn test_copy_file_creates_parent() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        std::fs::write(&src, b"hello").unwrap();
        let dst = dir.path().join("nested/dir/dst.txt");

        let bytes = copy_file(&src, &dst).await.unwrap();
        assert_eq!(bytes, 5);
        assert_eq!(std::fs::read(&dst).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_copy_file_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = copy_file(&dir.path().join("nope"), &dir.path().join("dst"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[tokio::test]
    async fn test_write_file_creates_parent_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let dst = dir.path().join("images/icon.png");

        write_file(&dst, b"first").await.unwrap();
        write_file(&dst, b"second").await.unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_copy_tree_recursive() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("docs");
        std::fs::create_dir_all(src.join("guides")).unwrap();
        std::fs::write(src.join("README.md"), "readme").unwrap();
        std::fs::write(src.join("guides/publish.md"), "publish").unwrap();

        let dst = dir.path().join("out/docs");
        let copied = copy_tree(&src, &dst).await.unwrap();

        assert_eq!(copied, 2);
        assert_eq!(std::fs::read_to_string(dst.join("README.md")).unwrap(), "readme");
        assert_eq!(
            std::fs::read_to_string(dst.join("guides/publish.md")).unwrap(),
            "publish"
        );
    }

    #[tokio::test]
    async fn test_copy_tree_rejects_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = copy_tree(&dir.path().join("missing"), &dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[tokio::test]
    async fn test_write_json_pretty_with_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        write_json(&path, &serde_json::json!({"a": 1})).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"a\": 1\n}\n");
        assert!(!dir.path().join("data.json.tmp").exists());
    }
}
