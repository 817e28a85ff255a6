//! Recipe provider abstraction.
//!
//! The orchestrator only ever talks to a [`RecipeProvider`]. Concrete providers
//! read the bundled catalog, a remote recipe API, or scripted test data.

mod api;
mod catalog;
mod fake;

pub use api::RecipeApiProvider;
pub use catalog::CatalogProvider;
pub use fake::FakeProvider;

use async_trait::async_trait;
use std::fmt;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::ProviderError;
use crate::http::ApiClient;
use crate::types::RecipeRecord;

/// Source of recipe records.
///
/// Implementations must be thread-safe. Errors are reported, never retried here;
/// callers decide how to degrade.
#[async_trait]
pub trait RecipeProvider: Send + Sync + fmt::Debug {
    /// Look up a single dish by title. `Ok(None)` means not found.
    async fn fetch_recipe_by_title(&self, title: &str)
        -> Result<Option<RecipeRecord>, ProviderError>;

    /// Dishes for a cuisine, at most `limit`. Unknown cuisines yield an empty list.
    async fn fetch_recipes_by_region(
        &self,
        region: &str,
        limit: usize,
    ) -> Result<Vec<RecipeRecord>, ProviderError>;

    /// Short provider name for logs ("catalog", "api", "fake").
    fn provider_name(&self) -> &'static str;
}

/// Build the provider described by `config`.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn RecipeProvider>, ProviderError> {
    match config.kind {
        ProviderKind::Catalog => {
            let provider = match &config.catalog_path {
                Some(path) => CatalogProvider::from_path(path)?,
                None => CatalogProvider::sample()?,
            };
            tracing::debug!(recipes = provider.len(), "using catalog provider");
            Ok(Box::new(provider))
        }
        ProviderKind::Api => {
            let base_url = config.api_base_url.as_deref().ok_or_else(|| {
                ProviderError::Unavailable("API base URL not configured".to_string())
            })?;
            let client = ApiClient::builder()
                .api_key(config.api_key.clone())
                .rate_limit_ms(config.rate_limit_ms)
                .timeout(config.request_timeout)
                .build()
                .map_err(crate::error::FetchError::from)?;
            tracing::debug!(base_url, "using recipe API provider");
            Ok(Box::new(RecipeApiProvider::new(client, base_url)?))
        }
    }
}

/// Build a provider from `FLAVOR_BRIDGE_*` environment variables.
///
/// See [`ProviderConfig::from_env`] for the recognized variables.
pub fn create_provider_from_env() -> Result<Box<dyn RecipeProvider>, ProviderError> {
    let config = ProviderConfig::from_env()?;
    create_provider(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_config_uses_sample_catalog() {
        let provider = create_provider(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.provider_name(), "catalog");
        let korean = provider.fetch_recipes_by_region("Korean", 10).await.unwrap();
        assert!(!korean.is_empty());
    }

    #[test]
    fn api_kind_needs_base_url() {
        let config = ProviderConfig {
            kind: ProviderKind::Api,
            ..ProviderConfig::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(ProviderError::Unavailable(_))
        ));
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let config = ProviderConfig::default()
            .catalog_path(Some("/nonexistent/flavor-bridge/catalog.json".into()));
        assert!(matches!(
            create_provider(&config),
            Err(ProviderError::Catalog(_))
        ));
    }
}
