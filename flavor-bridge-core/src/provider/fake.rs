//! Fake recipe provider for testing.
//!
//! Returns scripted records, scripted failures, and can stall to exercise
//! timeouts, all without network access.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::RecipeProvider;
use crate::error::ProviderError;
use crate::types::RecipeRecord;

#[derive(Debug, Default)]
pub struct FakeProvider {
    recipes: Vec<RecipeRecord>,
    /// Error message returned by title lookups, if set
    title_error: Option<String>,
    /// Error message returned by region lookups, if set
    region_error: Option<String>,
    /// Artificial latency applied to every call
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipe(mut self, record: RecipeRecord) -> Self {
        self.recipes.push(record);
        self
    }

    pub fn with_recipes(mut self, records: impl IntoIterator<Item = RecipeRecord>) -> Self {
        self.recipes.extend(records);
        self
    }

    pub fn failing_title_lookup(mut self, message: &str) -> Self {
        self.title_error = Some(message.to_string());
        self
    }

    pub fn failing_region_lookup(mut self, message: &str) -> Self {
        self.region_error = Some(message.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of provider calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RecipeProvider for FakeProvider {
    async fn fetch_recipe_by_title(
        &self,
        title: &str,
    ) -> Result<Option<RecipeRecord>, ProviderError> {
        self.enter().await;
        if let Some(message) = &self.title_error {
            return Err(ProviderError::Unavailable(message.clone()));
        }
        Ok(self
            .recipes
            .iter()
            .find(|r| r.title.eq_ignore_ascii_case(title.trim()))
            .cloned())
    }

    async fn fetch_recipes_by_region(
        &self,
        region: &str,
        limit: usize,
    ) -> Result<Vec<RecipeRecord>, ProviderError> {
        self.enter().await;
        if let Some(message) = &self.region_error {
            return Err(ProviderError::Unavailable(message.clone()));
        }
        Ok(self
            .recipes
            .iter()
            .filter(|r| {
                r.region
                    .as_deref()
                    .is_some_and(|reg| reg.eq_ignore_ascii_case(region.trim()))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_scripted_records() {
        let provider = FakeProvider::new()
            .with_recipe(RecipeRecord::new("Kimchi").with_region("Korean"))
            .with_recipe(RecipeRecord::new("Pad Thai").with_region("Thai"));

        let found = provider.fetch_recipe_by_title("kimchi").await.unwrap();
        assert_eq!(found.unwrap().title, "Kimchi");
        let thai = provider.fetch_recipes_by_region("thai", 5).await.unwrap();
        assert_eq!(thai.len(), 1);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn scripted_failures() {
        let provider = FakeProvider::new()
            .failing_title_lookup("down")
            .failing_region_lookup("down");
        assert!(provider.fetch_recipe_by_title("x").await.is_err());
        assert!(provider.fetch_recipes_by_region("x", 1).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied() {
        let provider = FakeProvider::new().with_delay(Duration::from_secs(30));
        let start = tokio::time::Instant::now();
        provider.fetch_recipes_by_region("Thai", 1).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(30));
    }
}
