//! HTTP client trait and implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;

use super::host_of;
use super::rate_limiter::RateLimiter;

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL and return the response body as text.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Configuration for [`ApiClient`].
#[derive(Clone)]
pub struct ApiClientBuilder {
    api_key: Option<String>,
    rate_limit_ms: u64,
    timeout: Duration,
    user_agent: String,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            rate_limit_ms: 200,
            timeout: Duration::from_secs(30),
            user_agent: format!("FlavorBridge/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Bearer token sent with every request.
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the rate limit delay in milliseconds. 0 disables rate limiting.
    pub fn rate_limit_ms(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<ApiClient, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(ApiClient {
            inner: Arc::new(inner),
            api_key: self.api_key,
            rate_limiter: RateLimiter::new(Duration::from_millis(self.rate_limit_ms)),
        })
    }
}

/// Production HTTP client: reqwest with per-host rate limiting and bearer auth.
pub struct ApiClient {
    /// Shared reqwest client for connection pooling.
    inner: Arc<reqwest::Client>,
    api_key: Option<String>,
    rate_limiter: RateLimiter,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for ApiClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        if let Some(host) = host_of(url) {
            self.rate_limiter.wait(&host).await;
        }

        let mut request = self.inner.get(parsed);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(url, "network: fetching");
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(url, status = %status, "network: request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| FetchError::InvalidEncoding(format!("Invalid UTF-8 in response: {}", e)))
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Body(String),
    Status(u16),
    Error(String),
}

/// Mock HTTP client for testing. Unknown URLs answer 404.
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_response(url, MockResponse::Body(body.to_string()))
    }

    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_response(url, MockResponse::Status(status))
    }

    pub fn with_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
            Some(MockResponse::Error(e)) => Err(FetchError::InvalidUrl(e.clone())),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
