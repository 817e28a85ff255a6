//! Feature extraction: turns a recipe title and its instruction steps into a
//! [`RecipeProfile`].
//!
//! Everything here is keyword matching over lower-cased text, evaluated in the
//! order the taxonomy declares its categories.

use std::collections::BTreeSet;

use crate::similarity::l1_normalize;
use crate::taxonomy::taxonomy;
use crate::types::{CookingMethod, RecipeProfile, RecipeRecord, WeightedVector, UNKNOWN_INGREDIENT};

/// Title substrings that imply flavor tags.
const TITLE_FLAVOR_RULES: &[(&[&str], &[(&str, f64)])] = &[
    (&["curry", "soup"], &[("savory", 0.4), ("aromatic", 0.3)]),
    (&["salad"], &[("fresh", 0.5)]),
    (&["kimchi", "sauce"], &[("bold", 0.4)]),
];

/// Title substrings that imply ingredients, applied after protein keywords.
const TITLE_INGREDIENT_RULES: &[(&[&str], &[&str])] = &[
    (
        &["vegetable", "minestrone", "broccoli", "zucchini"],
        &["vegetable"],
    ),
    (&["curry"], &["chicken", "coconut"]),
    (&["lentil"], &["lentil"]),
    (&["biryani"], &["rice"]),
];

const COMFORT_WEIGHT_HIGH: f64 = 1.0;
const COMFORT_WEIGHT_MEDIUM: f64 = 0.5;
const COMFORT_WEIGHT_LIGHT: f64 = 0.2;
const SLOW_SAUCY_COMFORT_BONUS: f64 = 2.0;
const DEFAULT_COMFORT_LEVEL: f64 = 0.5;

fn join_lower(parts: &[String]) -> String {
    parts
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains_any<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|kw| text.contains(kw.as_ref()))
}

/// Number of keywords that appear at least once.
fn count_present(text: &str, keywords: &[String]) -> usize {
    keywords.iter().filter(|kw| text.contains(kw.as_str())).count()
}

/// Total occurrences of all keywords.
fn count_occurrences(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|kw| !kw.is_empty())
        .map(|kw| text.matches(kw.as_str()).count())
        .sum()
}

/// Detect the dominant cooking method from instruction steps.
///
/// Each method scores the number of its keywords found in the joined text. The
/// first method in canonical order wins ties, so text without any keyword
/// resolves to [`CookingMethod::SlowSaucy`].
pub fn detect_method(instructions: &[String]) -> CookingMethod {
    let text = join_lower(instructions);
    let mut best = CookingMethod::default();
    let mut best_count = 0;

    for entry in &taxonomy().methods {
        let count = count_present(&text, &entry.keywords);
        if count > best_count {
            best_count = count;
            best = entry.method;
        }
    }

    best
}

/// First protein category with a keyword in the title, or `""`.
pub fn detect_protein(title: &str) -> String {
    let title = title.to_lowercase();
    taxonomy()
        .proteins
        .iter()
        .find(|p| contains_any(&title, &p.keywords))
        .map(|p| p.category.clone())
        .unwrap_or_default()
}

/// Infer a normalized flavor vector from the dish name and cooking method.
///
/// Falls back to `{savory: 1.0}` when no rule applies.
pub fn infer_flavor_vector(title: &str, method: CookingMethod) -> WeightedVector {
    let title = title.to_lowercase();
    let mut vector = WeightedVector::new();

    for (keywords, tags) in TITLE_FLAVOR_RULES {
        if contains_any(&title, *keywords) {
            for (tag, weight) in *tags {
                *vector.entry(tag.to_string()).or_insert(0.0) += weight;
            }
        }
    }

    match method {
        CookingMethod::SlowSaucy => {
            *vector.entry("comfort".to_string()).or_insert(0.0) += 0.5;
        }
        CookingMethod::StirFry => {
            *vector.entry("aromatic".to_string()).or_insert(0.0) += 0.3;
        }
        _ => {}
    }

    let vector = l1_normalize(vector);
    if vector.is_empty() {
        return WeightedVector::from([("savory".to_string(), 1.0)]);
    }
    vector
}

/// Count texture keyword families across title, steps and ingredients.
///
/// Families with no hits are omitted; the result is empty when nothing matched.
pub fn infer_texture_vector(
    title: &str,
    instructions: &[String],
    ingredients: &[String],
) -> WeightedVector {
    let mut parts = Vec::with_capacity(instructions.len() + ingredients.len() + 1);
    parts.push(title.to_string());
    parts.extend(instructions.iter().cloned());
    parts.extend(
        ingredients
            .iter()
            .filter(|i| i.as_str() != UNKNOWN_INGREDIENT)
            .cloned(),
    );
    let text = join_lower(&parts);

    let counts: WeightedVector = taxonomy()
        .textures
        .iter()
        .map(|t| (t.texture.clone(), count_occurrences(&text, &t.keywords) as f64))
        .collect();

    l1_normalize(counts)
}

/// Estimate how comforting a dish is, in [0, 1].
///
/// Tier hits are weighted 1.0 / 0.5 / 0.2 and averaged. Slow, saucy dishes get two
/// extra high-tier hits. Returns 0.5 when no tier keyword appears at all.
pub fn detect_comfort_level(title: &str, instructions: &[String], method: CookingMethod) -> f64 {
    let mut parts = vec![title.to_string()];
    parts.extend(instructions.iter().cloned());
    let text = join_lower(&parts);

    let tiers = &taxonomy().comfort_tiers;
    let mut high = count_occurrences(&text, &tiers.high) as f64;
    let medium = count_occurrences(&text, &tiers.medium) as f64;
    let light = count_occurrences(&text, &tiers.light) as f64;

    if high + medium + light == 0.0 {
        return DEFAULT_COMFORT_LEVEL;
    }

    if method == CookingMethod::SlowSaucy {
        high += SLOW_SAUCY_COMFORT_BONUS;
    }

    let weighted = COMFORT_WEIGHT_HIGH * high
        + COMFORT_WEIGHT_MEDIUM * medium
        + COMFORT_WEIGHT_LIGHT * light;
    (weighted / (high + medium + light)).clamp(0.0, 1.0)
}

/// Match instruction text against the known-ingredient dictionary.
pub fn extract_ingredients_from_instructions(instructions: &[String]) -> BTreeSet<String> {
    let text = join_lower(instructions);
    taxonomy()
        .ingredients
        .iter()
        .filter(|name| !name.is_empty() && text.contains(name.as_str()))
        .cloned()
        .collect()
}

/// Coarse ingredient guess from the dish name alone. Never empty.
pub fn infer_ingredients_from_title(title: &str) -> Vec<String> {
    let title = title.to_lowercase();
    let mut out: Vec<String> = Vec::new();
    let mut push = |item: &str| {
        if !out.iter().any(|existing| existing == item) {
            out.push(item.to_string());
        }
    };

    for protein in &taxonomy().proteins {
        if contains_any(&title, &protein.keywords) {
            if let Some(first) = protein.keywords.first() {
                push(first.as_str());
            }
        }
    }

    for (keywords, items) in TITLE_INGREDIENT_RULES {
        if contains_any(&title, *keywords) {
            items.iter().for_each(|item| push(*item));
        }
    }

    if out.is_empty() {
        out.push(UNKNOWN_INGREDIENT.to_string());
    }
    out
}

/// Build the full profile for a title and its steps.
pub fn build_profile(title: &str, instructions: &[String]) -> RecipeProfile {
    let method = detect_method(instructions);
    let protein = detect_protein(title);
    let flavor_vector = infer_flavor_vector(title, method);
    let ingredients_from_title = infer_ingredients_from_title(title);
    let ingredients_extracted = extract_ingredients_from_instructions(instructions);

    let mut known: Vec<String> = ingredients_from_title.clone();
    known.extend(ingredients_extracted.iter().cloned());
    let texture_vector = infer_texture_vector(title, instructions, &known);
    let comfort_level = detect_comfort_level(title, instructions, method);

    tracing::debug!(
        title,
        method = %method,
        protein = %protein,
        comfort_level,
        extracted = ingredients_extracted.len(),
        "built recipe profile"
    );

    RecipeProfile {
        title: title.to_string(),
        method,
        protein,
        flavor_vector,
        texture_vector,
        comfort_level,
        ingredients_from_title,
        ingredients_extracted,
        instructions: instructions.to_vec(),
    }
}

/// Profile a provider record, using its best available steps.
pub fn profile_record(record: &RecipeRecord) -> RecipeProfile {
    build_profile(&record.title, &record.steps())
}
