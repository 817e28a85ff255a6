//! HTTP plumbing for remote recipe providers.
//!
//! Every outgoing request goes through an [`HttpClient`] so providers can be
//! exercised against [`MockClient`] in tests.

mod client;
mod rate_limiter;

pub use client::{ApiClient, ApiClientBuilder, HttpClient, MockClient, MockResponse};
pub use rate_limiter::RateLimiter;

/// Host part of a URL, used as the rate limiting key.
pub fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_of_strips_path_and_query() {
        assert_eq!(
            host_of("https://recipes.example.com/recipes/by-title?title=Soup"),
            Some("recipes.example.com".to_string())
        );
        assert_eq!(host_of("not a url"), None);
    }
}
