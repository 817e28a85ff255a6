//! In-memory recipe catalog loaded from JSON.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use super::RecipeProvider;
use crate::error::ProviderError;
use crate::types::RecipeRecord;

const SAMPLE_CATALOG: &str = include_str!("../../../data/catalog.json");

#[derive(Deserialize)]
struct CatalogFile {
    recipes: Vec<RecipeRecord>,
}

/// Serves recipes from a fixed list, in list order.
#[derive(Debug, Clone, Default)]
pub struct CatalogProvider {
    recipes: Vec<RecipeRecord>,
}

impl CatalogProvider {
    pub fn new(recipes: Vec<RecipeRecord>) -> Self {
        Self { recipes }
    }

    /// The bundled sample catalog.
    pub fn sample() -> Result<Self, ProviderError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    /// Parse a catalog document of the form `{"recipes": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.recipes))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Case-insensitive exact title match, else the first partial match.
    pub fn find_by_title(&self, title: &str) -> Option<&RecipeRecord> {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.recipes
            .iter()
            .find(|r| r.title.to_lowercase() == needle)
            .or_else(|| {
                self.recipes
                    .iter()
                    .find(|r| r.title.to_lowercase().contains(&needle))
            })
    }

    pub fn in_region(&self, region: &str, limit: usize) -> Vec<RecipeRecord> {
        let region = region.trim().to_lowercase();
        self.recipes
            .iter()
            .filter(|r| {
                r.region
                    .as_deref()
                    .is_some_and(|reg| reg.to_lowercase() == region)
            })
            .take(limit)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecipeProvider for CatalogProvider {
    async fn fetch_recipe_by_title(
        &self,
        title: &str,
    ) -> Result<Option<RecipeRecord>, ProviderError> {
        Ok(self.find_by_title(title).cloned())
    }

    async fn fetch_recipes_by_region(
        &self,
        region: &str,
        limit: usize,
    ) -> Result<Vec<RecipeRecord>, ProviderError> {
        Ok(self.in_region(region, limit))
    }

    fn provider_name(&self) -> &'static str {
        "catalog"
    }
}
