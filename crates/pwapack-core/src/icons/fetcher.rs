use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use tokio::fs;
use tracing::debug;
use url::Url;

use crate::config::FetchConfig;
use crate::{Error, FetchError, Result};

/// Downloads one icon to a destination path.
///
/// Implementations must create any missing parent directories of
/// `destination` themselves.
#[async_trait]
pub trait IconFetcher: Send + Sync {
    /// Fetch `url` and save the body at `destination`.
    async fn fetch_icon(&self, url: &Url, destination: &Path) -> std::result::Result<(), FetchError>;
}

/// HTTP(S) icon fetcher backed by `reqwest`.
pub struct HttpIconFetcher {
    client: Client,
}

impl HttpIconFetcher {
    /// Creates a fetcher with default timeout and user agent.
    pub fn new() -> Result<Self> {
        Self::from_config(&FetchConfig::default())
    }

    /// Creates a fetcher from fetch configuration.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl IconFetcher for HttpIconFetcher {
    async fn fetch_icon(&self, url: &Url, destination: &Path) -> std::result::Result<(), FetchError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| FetchError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        fs::write(destination, &body)
            .await
            .map_err(|source| FetchError::Write {
                path: destination.to_path_buf(),
                source,
            })?;

        debug!(
            "Fetched {} bytes from {} into {}",
            body.len(),
            url,
            destination.display()
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    #[tokio::test]
    async fn test_fetch_icon_writes_nested_file() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/icons/128.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_BYTES))
            .mount(&mock_server)
            .await;

        let dir = TempDir::new()?;
        let destination = dir.path().join("icons/128.png");
        let url = Url::parse(&format!("{}/icons/128.png", mock_server.uri()))?;

        HttpIconFetcher::new()?
            .fetch_icon(&url, &destination)
            .await?;

        assert_eq!(std::fs::read(&destination)?, PNG_BYTES);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_icon_404_is_status_error() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let dir = TempDir::new()?;
        let destination = dir.path().join("missing.png");
        let url = Url::parse(&format!("{}/missing.png", mock_server.uri()))?;

        let err = HttpIconFetcher::new()?
            .fetch_icon(&url, &destination)
            .await
            .unwrap_err();

        match err {
            FetchError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(!destination.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_icon_timeout_is_network_error() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(PNG_BYTES)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let config = FetchConfig {
            timeout_secs: 1,
            ..FetchConfig::default()
        };
        let dir = TempDir::new()?;
        let url = Url::parse(&format!("{}/slow.png", mock_server.uri()))?;

        let err = HttpIconFetcher::from_config(&config)?
            .fetch_icon(&url, &dir.path().join("slow.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_icon_rejects_unsupported_scheme() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let url = Url::parse("ftp://example.com/icon.png")?;

        let err = HttpIconFetcher::new()?
            .fetch_icon(&url, &dir.path().join("icon.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        Ok(())
    }
}
