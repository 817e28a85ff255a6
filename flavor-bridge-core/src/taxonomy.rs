//! Static keyword tables used by profiling, allergen filtering and scoring.
//!
//! The tables are loaded from `data/taxonomy.json` at compile time and parsed once.
//! Every keyword list that participates in tie-breaking is an ordered list of
//! `(category, keywords)` pairs, so evaluation order is the order in the file.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::CookingMethod;

#[derive(Debug, Clone, Deserialize)]
pub struct MethodKeywords {
    pub method: CookingMethod,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProteinKeywords {
    pub category: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextureKeywords {
    pub texture: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComfortTiers {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub light: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechniqueKeywords {
    pub common: Vec<String>,
    pub complex: Vec<String>,
}

/// A suggested replacement for an excluded ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitute {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairingEntity {
    pub entity_name: String,
    pub category: String,
    pub similar_molecules: u32,
}

/// Molecular food-pairing data for one entity.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodPairing {
    pub entity_id: String,
    pub top_similar_entities: Vec<PairingEntity>,
}

/// All keyword tables, immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Taxonomy {
    pub methods: Vec<MethodKeywords>,
    pub proteins: Vec<ProteinKeywords>,
    pub allergens: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub allergen_substitutes: HashMap<String, Vec<Substitute>>,
    #[serde(default)]
    pub food_pairing: Vec<FoodPairing>,
    pub textures: Vec<TextureKeywords>,
    pub comfort_tiers: ComfortTiers,
    pub ingredients: Vec<String>,
    pub techniques: TechniqueKeywords,
}

static TAXONOMY: LazyLock<Taxonomy> = LazyLock::new(|| {
    let json = include_str!("../../data/taxonomy.json");
    Taxonomy::from_json(json).expect("Failed to parse taxonomy.json")
});

/// The process-wide taxonomy.
pub fn taxonomy() -> &'static Taxonomy {
    &TAXONOMY
}

impl Taxonomy {
    /// Parse a taxonomy file. Keywords are lower-cased so callers can match
    /// against lower-cased text directly.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut taxonomy: Taxonomy = serde_json::from_str(json)?;
        taxonomy.normalize();
        Ok(taxonomy)
    }

    fn normalize(&mut self) {
        let lower = |v: &mut Vec<String>| v.iter_mut().for_each(|k| *k = k.to_lowercase());
        self.methods.iter_mut().for_each(|m| lower(&mut m.keywords));
        self.proteins.iter_mut().for_each(|p| lower(&mut p.keywords));
        self.textures.iter_mut().for_each(|t| lower(&mut t.keywords));
        self.allergens.values_mut().for_each(lower);
        lower(&mut self.comfort_tiers.high);
        lower(&mut self.comfort_tiers.medium);
        lower(&mut self.comfort_tiers.light);
        lower(&mut self.ingredients);
        lower(&mut self.techniques.common);
        lower(&mut self.techniques.complex);
        self.allergens = self
            .allergens
            .drain()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
    }

    /// Keyword expansion for an allergen name, if the table knows it.
    pub fn allergen_keywords(&self, allergen: &str) -> Option<&[String]> {
        self.allergens.get(allergen).map(Vec::as_slice)
    }

    /// Pairing data for an entity (a protein category), if any.
    pub fn pairing_for(&self, entity_id: &str) -> Option<&FoodPairing> {
        self.food_pairing
            .iter()
            .find(|p| p.entity_id.eq_ignore_ascii_case(entity_id))
    }

    pub fn substitutes_for(&self, ingredient: &str) -> &[Substitute] {
        self.allergen_substitutes
            .get(ingredient)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
