//! HTTP/HTTPS table source.
//!
//! Issues a single `GET` per fetch and reads the full response body as an
//! Arrow IPC payload. No authentication, custom headers or query parameters.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use super::TableSource;
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("vitrina/", env!("CARGO_PKG_VERSION"));

/// A table source reading Arrow IPC over HTTP/HTTPS.
///
/// Absolute `http://` / `https://` locations are requested as given. Other
/// locations are joined onto the base URL, so a source created with
/// `http://localhost:8000` resolves `/arrow_preview` to
/// `http://localhost:8000/arrow_preview`.
///
/// # Example
///
/// ```no_run
/// use vitrina::source::{HttpTableSource, TableSource};
///
/// # async fn run() -> vitrina::Result<()> {
/// let source = HttpTableSource::new()?.with_base_url("http://localhost:8000");
/// let table = source.fetch("/arrow_preview").await?;
/// println!("{} rows", table.num_rows());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTableSource {
    client: Client,
    base_url: Option<String>,
}

impl HttpTableSource {
    /// Creates a new HTTP source without a base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::invalid_config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Creates a new HTTP source with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::invalid_config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Resolve relative locations against `base_url`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Base URL joined to relative locations, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Constructs the full URL for a location.
    fn url_for(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            return location.to_string();
        }
        match &self.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                location.trim_start_matches('/')
            ),
            None => location.to_string(),
        }
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    async fn fetch_bytes(&self, location: &str) -> Result<Bytes> {
        let url = self.url_for(location);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch(&url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| Error::fetch(&url, format!("failed to read response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_absolute_passthrough() {
        let source = HttpTableSource::new()
            .unwrap()
            .with_base_url("http://base.example");
        assert_eq!(
            source.url_for("https://other.example/data.arrow"),
            "https://other.example/data.arrow"
        );
    }

    #[test]
    fn test_url_join_slashes() {
        let source = HttpTableSource::new()
            .unwrap()
            .with_base_url("http://localhost:8000/");
        assert_eq!(
            source.url_for("/arrow_preview"),
            "http://localhost:8000/arrow_preview"
        );
        assert_eq!(
            source.url_for("arrow_preview"),
            "http://localhost:8000/arrow_preview"
        );
    }

    #[test]
    fn test_url_without_base() {
        let source = HttpTableSource::new().unwrap();
        assert_eq!(source.base_url(), None);
        assert_eq!(source.url_for("/arrow_preview"), "/arrow_preview");
    }

    #[test]
    fn test_with_timeout() {
        assert!(HttpTableSource::with_timeout(30).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_relative_without_base_fails() {
        let source = HttpTableSource::new().unwrap();
        let result = source.fetch("/arrow_preview").await;
        assert!(matches!(result, Err(Error::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        // Port 9 (discard) on localhost is closed on test machines.
        let source = HttpTableSource::with_timeout(5).unwrap();
        let result = source.fetch("http://127.0.0.1:9/arrow_preview").await;
        assert!(matches!(result, Err(Error::Fetch { .. })));
    }

    #[test]
    fn test_debug() {
        let source = HttpTableSource::new()
            .unwrap()
            .with_base_url("http://example.com");
        let debug_str = format!("{:?}", source);
        assert!(debug_str.contains("HttpTableSource"));
        assert!(debug_str.contains("example.com"));
    }
}
