use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response encoding: {0}")]
    InvalidEncoding(String),
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Recipe fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Malformed recipe payload: {0}")]
    Parse(String),

    #[error("Recipe provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to read recipe catalog: {0}")]
    Catalog(#[from] std::io::Error),

    #[error("Provider failure: {0}")]
    Unavailable(String),

    #[error("Provider misconfigured: {0}")]
    Config(#[from] ConfigError),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Parse(e.to_string())
    }
}
