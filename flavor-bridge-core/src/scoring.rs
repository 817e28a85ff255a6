//! Multi-factor scoring of a candidate profile against the source profile.
//!
//! The ranking score is a fixed weighted sum of five factors. A second set of
//! metrics is computed alongside it for explanation only.

use serde::Serialize;

use crate::similarity::{cosine_similarity, jaccard_similarity, scalar_closeness, NEUTRAL_SIMILARITY};
use crate::taxonomy::taxonomy;
use crate::types::{DetailedMetrics, RecipeProfile};

pub const METHOD_WEIGHT: f64 = 0.30;
pub const FLAVOR_WEIGHT: f64 = 0.25;
pub const INGREDIENT_WEIGHT: f64 = 0.25;
pub const PROTEIN_WEIGHT: f64 = 0.10;
pub const PAIRING_WEIGHT: f64 = 0.10;

const FLAVOR_REASON_THRESHOLD: f64 = 0.6;
const PAIRING_REASON_THRESHOLD: f64 = 0.5;
const TECHNIQUE_BASELINE: f64 = 0.1;

/// Raw factor values feeding the weighted score, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreFactors {
    pub method_match: f64,
    pub flavor_similarity: f64,
    pub ingredient_similarity: f64,
    pub protein_match: f64,
    pub pairing_overlap: f64,
}

impl ScoreFactors {
    pub fn weighted(&self) -> f64 {
        let total = METHOD_WEIGHT * self.method_match
            + FLAVOR_WEIGHT * self.flavor_similarity
            + INGREDIENT_WEIGHT * self.ingredient_similarity
            + PROTEIN_WEIGHT * self.protein_match
            + PAIRING_WEIGHT * self.pairing_overlap;
        total.clamp(0.0, 1.0)
    }
}

/// Score plus the explanation that goes with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub factors: ScoreFactors,
    pub reasons: Vec<String>,
    pub metrics: DetailedMetrics,
}

/// Fraction of the source protein's pairing partners found among the target's ingredients.
///
/// Pairing data exists only for some proteins (the bundled table covers chicken);
/// any other protein gets the neutral 0.5.
pub fn pairing_overlap(source_protein: &str, target_ingredients: &[String]) -> f64 {
    let Some(pairing) = taxonomy().pairing_for(source_protein).filter(|_| !source_protein.is_empty())
    else {
        return NEUTRAL_SIMILARITY;
    };

    let similar: Vec<String> = pairing
        .top_similar_entities
        .iter()
        .map(|e| e.entity_name.to_lowercase())
        .collect();
    let targets: Vec<String> = target_ingredients
        .iter()
        .map(|i| i.to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();

    let matches = similar
        .iter()
        .filter(|s| targets.iter().any(|t| t.contains(s.as_str()) || s.contains(t.as_str())))
        .count();

    (matches as f64 / similar.len().max(1) as f64).min(1.0)
}

/// Share of common techniques among technique keywords found in the steps.
///
/// `common / (common + complex + 1)`, or a 0.1 baseline when no common technique
/// is present.
pub fn technique_score(instructions: &[String]) -> f64 {
    let text = instructions
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let techniques = &taxonomy().techniques;
    let common = techniques
        .common
        .iter()
        .filter(|kw| text.contains(kw.as_str()))
        .count();
    let complex = techniques
        .complex
        .iter()
        .filter(|kw| text.contains(kw.as_str()))
        .count();

    if common == 0 {
        return TECHNIQUE_BASELINE;
    }
    common as f64 / (common + complex + 1) as f64
}

fn percent(value: f64) -> f64 {
    (value.clamp(0.0, 1.0) * 1000.0).round() / 10.0
}

fn display_protein(protein: &str) -> &str {
    if protein.is_empty() {
        "none"
    } else {
        protein
    }
}

/// Score `target` against `source`.
pub fn score(source: &RecipeProfile, target: &RecipeProfile) -> ScoreBreakdown {
    let method_ok = source.method == target.method;
    let protein_ok = source.has_protein() && source.protein == target.protein;

    let factors = ScoreFactors {
        method_match: if method_ok { 1.0 } else { 0.0 },
        flavor_similarity: cosine_similarity(&source.flavor_vector, &target.flavor_vector),
        ingredient_similarity: jaccard_similarity(
            &source.ingredients_extracted,
            &target.ingredients_extracted,
        ),
        protein_match: if protein_ok { 1.0 } else { 0.0 },
        pairing_overlap: pairing_overlap(&source.protein, &target.all_ingredients()),
    };

    let mut reasons = Vec::with_capacity(5);

    if method_ok {
        reasons.push(format!("Same cooking method: {}", target.method));
    } else {
        reasons.push(format!(
            "Cooking style: {} vs {}",
            target.method, source.method
        ));
    }

    if factors.flavor_similarity >= FLAVOR_REASON_THRESHOLD {
        reasons.push(format!(
            "Similar aromatic and flavor profile ({:.0}% match)",
            factors.flavor_similarity * 100.0
        ));
    } else {
        reasons.push(format!(
            "Flavor similarity: {:.2}",
            factors.flavor_similarity
        ));
    }

    let shared: Vec<&str> = source
        .ingredients_extracted
        .intersection(&target.ingredients_extracted)
        .map(String::as_str)
        .collect();
    if shared.is_empty() {
        reasons.push("No shared ingredients detected".to_string());
    } else {
        reasons.push(format!("Shared ingredients: {}", shared.join(", ")));
    }

    if target.has_protein() {
        if protein_ok {
            reasons.push(format!("Same protein type: {}", target.protein));
        } else {
            reasons.push(format!(
                "Protein: {} vs {}",
                target.protein,
                display_protein(&source.protein)
            ));
        }
    }

    if factors.pairing_overlap >= PAIRING_REASON_THRESHOLD {
        reasons.push("Good food pairing overlap with your comfort dish".to_string());
    }

    let adaptability = 0.4 * factors.method_match
        + 0.3 * factors.ingredient_similarity
        + 0.2 * technique_score(&target.instructions)
        + 0.1 * factors.protein_match;

    let metrics = DetailedMetrics {
        comfort_similarity: percent(scalar_closeness(
            source.comfort_level,
            target.comfort_level,
        )),
        flavor_similarity: percent(factors.flavor_similarity),
        adaptability: percent(adaptability),
        texture_alignment: percent(cosine_similarity(
            &source.texture_vector,
            &target.texture_vector,
        )),
        ingredient_match: percent(factors.ingredient_similarity),
    };

    ScoreBreakdown {
        score: factors.weighted(),
        factors,
        reasons,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::build_profile;
    use crate::types::{CookingMethod, WeightedVector};

    fn steps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn minestrone() -> RecipeProfile {
        build_profile(
            "Judy's Hearty Vegetable Minestrone Soup",
            &steps(&[
                "heat oil in a large pot over medium heat",
                "add vegetables and cook until softened",
                "stir occasionally to prevent sticking",
                "add seasoning and broth",
                "bring to a boil",
                "reduce heat and simmer",
                "cook until vegetables are tender",
                "serve hot",
            ]),
        )
    }

    #[test]
    fn weights_sum_to_one() {
        let total =
            METHOD_WEIGHT + FLAVOR_WEIGHT + INGREDIENT_WEIGHT + PROTEIN_WEIGHT + PAIRING_WEIGHT;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn self_match_scores_high() {
        let p = minestrone();
        assert!(!p.ingredients_extracted.is_empty());
        let result = score(&p, &p.clone());
        assert!(result.score >= 0.85, "score was {}", result.score);
        assert!(result.score <= 1.0);
        assert_eq!(result.reasons[0], "Same cooking method: slow_saucy");
        assert_eq!(result.metrics.ingredient_match, 100.0);
        assert_eq!(result.metrics.comfort_similarity, 100.0);
    }

    #[test]
    fn reasons_follow_fixed_order() {
        let source = build_profile("Chicken Stew", &steps(&["simmer the chicken with tomato"]));
        let target = build_profile(
            "Garlic Shrimp",
            &steps(&["heat oil", "toss shrimp with garlic"]),
        );
        let result = score(&source, &target);
        assert_eq!(result.reasons[0], "Cooking style: stir_fry vs slow_saucy");
        assert!(result.reasons[1].starts_with("Flavor similarity"));
        assert_eq!(result.reasons[2], "No shared ingredients detected");
        assert_eq!(result.reasons[3], "Protein: seafood vs chicken");
        // chicken pairing partners (tomato, mushroom, cheese) absent from the shrimp dish
        assert_eq!(result.factors.pairing_overlap, 0.0);
        assert_eq!(result.reasons.len(), 4);
    }

    #[test]
    fn protein_reason_omitted_without_target_protein() {
        let source = build_profile("Chicken Stew", &steps(&["simmer"]));
        let target = build_profile("Gochujang Sauce", &steps(&["whisk until smooth"]));
        let result = score(&source, &target);
        assert!(!result.reasons.iter().any(|r| r.starts_with("Protein")));
        assert!(!result.reasons.iter().any(|r| r.starts_with("Same protein")));
    }

    #[test]
    fn pairing_neutral_for_uncovered_proteins() {
        assert_eq!(pairing_overlap("seafood", &steps(&["tomato"])), 0.5);
        assert_eq!(pairing_overlap("", &steps(&["tomato"])), 0.5);
    }

    #[test]
    fn pairing_fraction_for_chicken() {
        let overlap = pairing_overlap("chicken", &steps(&["Tomato", "mushroom caps"]));
        assert!((overlap - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(pairing_overlap("chicken", &[]), 0.0);
    }

    #[test]
    fn technique_score_baseline_and_ratio() {
        assert_eq!(technique_score(&steps(&["plate it"])), 0.1);
        // boil + season common, ferment complex
        let s = technique_score(&steps(&["boil", "ferment overnight", "season"]));
        assert!((s - 2.0 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn closer_flavor_ranks_ahead() {
        let base = build_profile("Chicken Soup", &steps(&["simmer chicken with rice"]));

        let mut close = base.clone();
        close.title = "Close".to_string();
        let mut far = base.clone();
        far.title = "Far".to_string();
        far.flavor_vector = WeightedVector::from([("bold".to_string(), 1.0)]);

        let close_score = score(&base, &close).score;
        let far_score = score(&base, &far).score;
        assert!(close_score > far_score);
        assert_eq!(close.method, CookingMethod::SlowSaucy);
    }

    #[test]
    fn metrics_are_percentages() {
        let source = minestrone();
        let target = build_profile("Italian Zucchini Saute", &steps(&["slice zucchini", "heat oil", "stir"]));
        let m = score(&source, &target).metrics;
        for value in [
            m.comfort_similarity,
            m.flavor_similarity,
            m.adaptability,
            m.texture_alignment,
            m.ingredient_match,
        ] {
            assert!((0.0..=100.0).contains(&value));
        }
    }
}
