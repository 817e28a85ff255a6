use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sparse tag → weight mapping used for flavor and texture profiles.
pub type WeightedVector = BTreeMap<String, f64>;

/// Cooking method categories in canonical declaration order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingMethod {
    #[default]
    SlowSaucy,
    StirFry,
    RoastBake,
    RawMix,
    Fry,
}

impl CookingMethod {
    /// All methods in canonical order. Earlier entries win detection ties.
    pub const ALL: &'static [CookingMethod] = &[
        CookingMethod::SlowSaucy,
        CookingMethod::StirFry,
        CookingMethod::RoastBake,
        CookingMethod::RawMix,
        CookingMethod::Fry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CookingMethod::SlowSaucy => "slow_saucy",
            CookingMethod::StirFry => "stir_fry",
            CookingMethod::RoastBake => "roast_bake",
            CookingMethod::RawMix => "raw_mix",
            CookingMethod::Fry => "fry",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "slow_saucy" => Some(CookingMethod::SlowSaucy),
            "stir_fry" => Some(CookingMethod::StirFry),
            "roast_bake" => Some(CookingMethod::RoastBake),
            "raw_mix" => Some(CookingMethod::RawMix),
            "fry" => Some(CookingMethod::Fry),
            _ => None,
        }
    }

    /// Position in canonical order.
    pub fn rank(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }
}

impl fmt::Display for CookingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipe as returned by a recipe provider - text is raw, nothing is inferred yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(alias = "Recipe_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Full instruction steps, when the provider has them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    /// Short process tags ("boil", "stir"), used when instructions are absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes: Option<Vec<String>>,
}

impl RecipeRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_instructions<S: Into<String>>(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.instructions = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_processes<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.processes = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Steps used for profiling: instructions, else process tags, else `["cook"]`.
    pub fn steps(&self) -> Vec<String> {
        if let Some(steps) = self.instructions.as_ref().filter(|s| !s.is_empty()) {
            return steps.clone();
        }
        if let Some(tags) = self.processes.as_ref().filter(|p| !p.is_empty()) {
            return tags.clone();
        }
        vec![DEFAULT_STEP.to_string()]
    }
}

/// Step assumed for recipes that carry no instruction text at all.
pub const DEFAULT_STEP: &str = "cook";

/// Sentinel for dishes whose title reveals no ingredients.
pub const UNKNOWN_INGREDIENT: &str = "unknown";

/// Structured features inferred from a recipe's title and steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeProfile {
    pub title: String,
    pub method: CookingMethod,
    /// Protein category, empty when none was detected
    pub protein: String,
    pub flavor_vector: WeightedVector,
    pub texture_vector: WeightedVector,
    pub comfort_level: f64,
    /// Coarse inference from the dish name; never empty
    pub ingredients_from_title: Vec<String>,
    /// Dictionary matches from the instruction text
    pub ingredients_extracted: BTreeSet<String>,
    pub instructions: Vec<String>,
}

impl RecipeProfile {
    /// All ingredient tokens known for this profile (title-inferred and extracted).
    pub fn all_ingredients(&self) -> Vec<String> {
        let mut out = self.ingredients_from_title.clone();
        for item in &self.ingredients_extracted {
            if !out.contains(item) {
                out.push(item.clone());
            }
        }
        out
    }

    pub fn has_protein(&self) -> bool {
        !self.protein.is_empty()
    }
}

/// Reporting-only breakdown, every field a percentage in 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedMetrics {
    pub comfort_similarity: f64,
    pub flavor_similarity: f64,
    pub adaptability: f64,
    pub texture_alignment: f64,
    pub ingredient_match: f64,
}

/// One ranked recommendation with its justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub title: String,
    pub score: f64,
    pub reasons: Vec<String>,
    pub metrics: DetailedMetrics,
    /// Set when allergen filtering removed every candidate and this one was returned anyway
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_match_fallback: bool,
}
