use std::sync::Arc;

use futures_util::StreamExt;
use thiserror::Error;

use crate::session::SessionCookie;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP client seeded with the browser's cookies so image GETs ride the
/// authenticated chat session.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Build one persistent client carrying `cookies`.
    ///
    /// No request timeout is configured; stop takes effect only between
    /// loop cycles, never mid-request.
    pub fn with_cookies(cookies: &[SessionCookie]) -> Result<Self, FetchError> {
        let jar = Arc::new(reqwest::cookie::Jar::default());
        for cookie in cookies {
            let Some((value, url)) = cookie.jar_entry() else {
                capture_logging::capture_warn!("skipping cookie {} without a domain", cookie.name);
                continue;
            };
            match reqwest::Url::parse(&url) {
                Ok(url) => jar.add_cookie_str(&value, &url),
                Err(err) => {
                    capture_logging::capture_warn!(
                        "skipping cookie {} with unusable domain: {}",
                        cookie.name,
                        err
                    );
                }
            }
        }

        let client = reqwest::Client::builder()
            .cookie_provider(jar)
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))?;
        Ok(Self { client })
    }

    pub fn new() -> Result<Self, FetchError> {
        Self::with_cookies(&[])
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::InvalidUrl(err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| FetchError::Network(err.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}
