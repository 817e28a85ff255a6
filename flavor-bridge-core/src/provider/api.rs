//! Remote recipe API provider.
//!
//! Endpoints:
//! - `GET {base}/recipes/by-title?title=...`
//! - `GET {base}/recipes/by-region?region=...&limit=...`
//!
//! Both answer `{"data": [RecipeRecord, ...]}`. A 404 or an empty `data` list
//! means nothing was found.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use url::Url;

use super::RecipeProvider;
use crate::error::{FetchError, ProviderError};
use crate::http::HttpClient;
use crate::types::RecipeRecord;

#[derive(Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    data: Vec<RecipeRecord>,
}

pub struct RecipeApiProvider<C: HttpClient> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> fmt::Debug for RecipeApiProvider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeApiProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl<C: HttpClient> RecipeApiProvider<C> {
    pub fn new(client: C, base_url: &str) -> Result<Self, ProviderError> {
        let parsed = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
        let url = Url::parse_with_params(&format!("{}{}", self.base_url, path), params)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(url.to_string())
    }

    /// GET `url` and unwrap the `data` envelope. 404 maps to an empty list.
    async fn get_records(&self, url: &str) -> Result<Vec<RecipeRecord>, ProviderError> {
        match self.client.get_text(url).await {
            Ok(body) => {
                let envelope: ApiEnvelope = serde_json::from_str(&body)?;
                Ok(envelope.data)
            }
            Err(FetchError::Status { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<C: HttpClient> RecipeProvider for RecipeApiProvider<C> {
    async fn fetch_recipe_by_title(
        &self,
        title: &str,
    ) -> Result<Option<RecipeRecord>, ProviderError> {
        let url = self.endpoint("/recipes/by-title", &[("title", title)])?;
        let records = self.get_records(&url).await?;
        Ok(records.into_iter().next())
    }

    async fn fetch_recipes_by_region(
        &self,
        region: &str,
        limit: usize,
    ) -> Result<Vec<RecipeRecord>, ProviderError> {
        let limit_param = limit.to_string();
        let url = self.endpoint(
            "/recipes/by-region",
            &[("region", region), ("limit", limit_param.as_str())],
        )?;
        let mut records = self.get_records(&url).await?;
        records.truncate(limit);
        Ok(records)
    }

    fn provider_name(&self) -> &'static str {
        "api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockClient;

    const BASE: &str = "https://recipes.example.com/v1";

    #[tokio::test]
    async fn title_lookup_reads_first_record() {
        let client = MockClient::new().with_body(
            "https://recipes.example.com/v1/recipes/by-title?title=Egyptian+Lentil+Soup",
            r#"{"data": [{"Recipe_title": "Egyptian Lentil Soup", "region": "Northern Africa"}]}"#,
        );
        let provider = RecipeApiProvider::new(client, BASE).unwrap();
        let record = provider
            .fetch_recipe_by_title("Egyptian Lentil Soup")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.title, "Egyptian Lentil Soup");
        assert_eq!(record.steps(), vec!["cook"]);
    }

    #[tokio::test]
    async fn not_found_is_none() {
        let client = MockClient::new().with_body(
            "https://recipes.example.com/v1/recipes/by-title?title=Nothing",
            r#"{"data": []}"#,
        );
        let provider = RecipeApiProvider::new(client, BASE).unwrap();
        assert!(provider.fetch_recipe_by_title("Nothing").await.unwrap().is_none());
        // unscripted URL answers 404
        assert!(provider.fetch_recipe_by_title("Other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn region_lookup_passes_limit() {
        let client = MockClient::new().with_body(
            "https://recipes.example.com/v1/recipes/by-region?region=Indian+Subcontinent&limit=1",
            r#"{"data": [{"title": "Vegetable Biryani"}, {"title": "Chicken Biryani"}]}"#,
        );
        let provider = RecipeApiProvider::new(client, "https://recipes.example.com/v1/").unwrap();
        let records = provider
            .fetch_recipes_by_region("Indian Subcontinent", 1)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Vegetable Biryani");
    }

    #[tokio::test]
    async fn server_errors_propagate() {
        let client = MockClient::new().with_status(
            "https://recipes.example.com/v1/recipes/by-region?region=Thai&limit=5",
            503,
        );
        let provider = RecipeApiProvider::new(client, BASE).unwrap();
        let err = provider.fetch_recipes_by_region("Thai", 5).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Fetch(FetchError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let client = MockClient::new().with_body(
            "https://recipes.example.com/v1/recipes/by-title?title=Soup",
            "<html>oops</html>",
        );
        let provider = RecipeApiProvider::new(client, BASE).unwrap();
        assert!(matches!(
            provider.fetch_recipe_by_title("Soup").await,
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(RecipeApiProvider::new(MockClient::new(), "not a url").is_err());
    }
}
