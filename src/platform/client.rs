//! HTTP client for the video platform's pages and scripts

use crate::error::YoatError;
use crate::platform::retry::{RetryConfig, RetryExecutor};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default platform origin
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Source of the three documents audio resolution reads
#[async_trait::async_trait]
pub trait SourceFetcher: Send + Sync {
    /// URL-encoded video info body for `video_id`
    async fn fetch_video_info(&self, video_id: &str) -> Result<String, YoatError>;

    /// Watch page HTML for `video_id`
    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, YoatError>;

    /// Player script at the site-relative `path`
    async fn fetch_script(&self, path: &str) -> Result<String, YoatError>;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Platform origin all requests go to
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after a timed-out request
    pub max_retries: u32,
    /// User agent string
    pub user_agent: Option<String>,
    /// Proxy URL
    pub proxy_url: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 1,
            user_agent: None,
            proxy_url: None,
        }
    }
}

/// Platform client backed by reqwest
#[derive(Debug, Clone)]
pub struct PlatformClient {
    client: Client,
    config: HttpClientConfig,
    retry: RetryExecutor,
}

impl PlatformClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, YoatError> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, YoatError> {
        Url::parse(&config.base_url)?;

        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(
                config
                    .user_agent
                    .as_deref()
                    .unwrap_or(DEFAULT_USER_AGENT),
            );

        if let Some(proxy_url) = &config.proxy_url {
            match reqwest::Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => warn!("Ignoring invalid proxy {}: {}", proxy_url, e),
            }
        }

        let retry = RetryExecutor::with_config(RetryConfig {
            max_retries: config.max_retries,
            ..RetryConfig::default()
        });

        Ok(Self {
            client: builder.build()?,
            config,
            retry,
        })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Absolute URL for a site-relative path
    fn endpoint(&self, path: &str) -> Result<Url, YoatError> {
        Ok(Url::parse(&format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            path
        ))?)
    }

    /// GET `url` and return the body text, whatever the status
    async fn fetch_text(&self, url: Url) -> Result<String, YoatError> {
        let client = self.client.clone();

        self.retry
            .execute(move || {
                let client = client.clone();
                let url = url.clone();
                Box::pin(async move {
                    debug!("GET {}", url);
                    let response = client.get(url.clone()).send().await.map_err(request_error)?;

                    if !response.status().is_success() {
                        warn!("{} answered with status {}", url, response.status());
                    }

                    response.text().await.map_err(request_error)
                })
            })
            .await
    }
}

#[async_trait::async_trait]
impl SourceFetcher for PlatformClient {
    async fn fetch_video_info(&self, video_id: &str) -> Result<String, YoatError> {
        let mut url = self.endpoint("/get_video_info")?;
        url.query_pairs_mut().append_pair("video_id", video_id);
        self.fetch_text(url).await
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, YoatError> {
        let mut url = self.endpoint("/watch")?;
        url.query_pairs_mut().append_pair("v", video_id);
        self.fetch_text(url).await
    }

    async fn fetch_script(&self, path: &str) -> Result<String, YoatError> {
        let url = self.endpoint(path)?;
        self.fetch_text(url).await
    }
}

/// Map a reqwest failure, keeping timeouts distinguishable for retry
fn request_error(error: reqwest::Error) -> YoatError {
    if error.is_timeout() {
        YoatError::Timeout(error.to_string())
    } else {
        YoatError::RequestFailed(error)
    }
}
