//! Configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default bound on each provider call.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default delay between requests to the same host.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 200;

/// Default number of candidates requested per cuisine.
pub const DEFAULT_REGION_LIMIT: usize = 50;

/// Number of ranked results returned.
pub const DEFAULT_TOP_N: usize = 3;

/// Best scores below this get a low-confidence warning.
pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f64 = 0.20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },

    #[error("Unknown recipe provider: {0} (expected \"catalog\" or \"api\")")]
    UnknownProvider(String),
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
    }
}

fn env_lookup(var: &str) -> Option<String> {
    env::var(var).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Catalog,
    Api,
}

/// Which recipe provider to build and how.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Catalog JSON file; `None` uses the bundled sample catalog.
    pub catalog_path: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
    pub rate_limit_ms: u64,
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Catalog,
            catalog_path: None,
            api_base_url: None,
            api_key: None,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ProviderConfig {
    /// Load provider configuration from environment variables.
    ///
    /// - `FLAVOR_BRIDGE_PROVIDER`: "catalog" (default) or "api"
    /// - `FLAVOR_BRIDGE_CATALOG`: catalog JSON path (default: bundled sample)
    /// - `FLAVOR_BRIDGE_API_BASE_URL`: required for "api"
    /// - `FLAVOR_BRIDGE_API_KEY`: required for "api"
    /// - `FLAVOR_BRIDGE_RATE_LIMIT_MS`: per-host delay (default: 200)
    /// - `FLAVOR_BRIDGE_TIMEOUT_MS`: HTTP request timeout (default: 10000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let kind = match lookup("FLAVOR_BRIDGE_PROVIDER")
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            None | Some("") | Some("catalog") => ProviderKind::Catalog,
            Some("api") => ProviderKind::Api,
            Some(other) => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        let catalog_path = lookup("FLAVOR_BRIDGE_CATALOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let (api_base_url, api_key) = if kind == ProviderKind::Api {
            let base = lookup("FLAVOR_BRIDGE_API_BASE_URL").ok_or_else(|| {
                ConfigError::MissingEnvVar("FLAVOR_BRIDGE_API_BASE_URL".to_string())
            })?;
            let key = lookup("FLAVOR_BRIDGE_API_KEY")
                .ok_or_else(|| ConfigError::MissingEnvVar("FLAVOR_BRIDGE_API_KEY".to_string()))?;
            (Some(base), Some(key))
        } else {
            (None, None)
        };

        let rate_limit_ms = parse_var(&lookup, "FLAVOR_BRIDGE_RATE_LIMIT_MS", DEFAULT_RATE_LIMIT_MS)?;
        let timeout_ms = parse_var(&lookup, "FLAVOR_BRIDGE_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;

        Ok(Self {
            kind,
            catalog_path,
            api_base_url,
            api_key,
            rate_limit_ms,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn catalog_path(mut self, path: Option<PathBuf>) -> Self {
        self.catalog_path = path;
        self
    }
}

/// Tunables for a single recommendation request.
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Bound on each provider call made by the orchestrator.
    pub provider_timeout: Duration,
    pub region_limit: usize,
    pub top_n: usize,
    pub low_confidence_threshold: f64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            region_limit: DEFAULT_REGION_LIMIT,
            top_n: DEFAULT_TOP_N,
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

impl RecommendConfig {
    /// Load from `FLAVOR_BRIDGE_TIMEOUT_MS` and `FLAVOR_BRIDGE_REGION_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_ms = parse_var(&lookup, "FLAVOR_BRIDGE_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        let region_limit = parse_var(&lookup, "FLAVOR_BRIDGE_REGION_LIMIT", DEFAULT_REGION_LIMIT)?;
        Ok(Self {
            provider_timeout: Duration::from_millis(timeout_ms),
            region_limit,
            ..Self::default()
        })
    }

    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn region_limit(mut self, limit: usize) -> Self {
        self.region_limit = limit;
        self
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn low_confidence_threshold(mut self, threshold: f64) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_to_catalog() {
        let config = ProviderConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.kind, ProviderKind::Catalog);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.rate_limit_ms, DEFAULT_RATE_LIMIT_MS);
    }

    #[test]
    fn api_requires_base_url_and_key() {
        let err = ProviderConfig::from_lookup(lookup(&[("FLAVOR_BRIDGE_PROVIDER", "api")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(v) if v == "FLAVOR_BRIDGE_API_BASE_URL"));

        let config = ProviderConfig::from_lookup(lookup(&[
            ("FLAVOR_BRIDGE_PROVIDER", "API"),
            ("FLAVOR_BRIDGE_API_BASE_URL", "https://recipes.example.com"),
            ("FLAVOR_BRIDGE_API_KEY", "secret"),
            ("FLAVOR_BRIDGE_RATE_LIMIT_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.kind, ProviderKind::Api);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.rate_limit_ms, 0);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = ProviderConfig::from_lookup(lookup(&[("FLAVOR_BRIDGE_PROVIDER", "scraper")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider(_)));
    }

    #[test]
    fn recommend_config_parses_numbers() {
        let config = RecommendConfig::from_lookup(lookup(&[
            ("FLAVOR_BRIDGE_TIMEOUT_MS", "250"),
            ("FLAVOR_BRIDGE_REGION_LIMIT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.provider_timeout, Duration::from_millis(250));
        assert_eq!(config.region_limit, 5);
        assert_eq!(config.top_n, DEFAULT_TOP_N);

        let err = RecommendConfig::from_lookup(lookup(&[("FLAVOR_BRIDGE_REGION_LIMIT", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
