//! Allergen exclusion checks.
//!
//! Excluded names are expanded through the taxonomy's allergen table ("dairy" →
//! milk, cream, ...). Names the table doesn't know are used as-is. Matching is a
//! bidirectional substring test so compound phrases on either side are caught.

use crate::taxonomy::{taxonomy, Substitute};
use crate::types::UNKNOWN_INGREDIENT;

/// Expand one excluded allergen name into the tokens to look for.
pub fn expand_allergen(allergen: &str) -> Vec<String> {
    let name = allergen.trim().to_lowercase();
    if name.is_empty() {
        return Vec::new();
    }
    match taxonomy().allergen_keywords(&name) {
        Some(keywords) => keywords.to_vec(),
        None => vec![name],
    }
}

fn normalize_ingredients(ingredients: &[String]) -> Vec<String> {
    ingredients
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty() && i != UNKNOWN_INGREDIENT)
        .collect()
}

fn token_matches(excluded: &str, ingredient: &str) -> bool {
    ingredient.contains(excluded) || excluded.contains(ingredient)
}

/// True if any ingredient matches any expanded excluded allergen.
pub fn contains_allergen(ingredients: &[String], excluded: &[String]) -> bool {
    !matched_allergens(ingredients, excluded).is_empty()
}

/// Excluded allergen names (as given, lower-cased) that match the ingredients.
pub fn matched_allergens(ingredients: &[String], excluded: &[String]) -> Vec<String> {
    let ingredients = normalize_ingredients(ingredients);
    if ingredients.is_empty() {
        return Vec::new();
    }

    let mut matched = Vec::new();
    for allergen in excluded {
        let hit = expand_allergen(allergen)
            .iter()
            .any(|token| ingredients.iter().any(|ing| token_matches(token, ing)));
        let name = allergen.trim().to_lowercase();
        if hit && !matched.contains(&name) {
            matched.push(name);
        }
    }
    matched
}

/// Substitutes for the given allergens, looked up by name and by each expanded token.
pub fn suggest_substitutes(allergens: &[String]) -> Vec<Substitute> {
    let mut out: Vec<Substitute> = Vec::new();
    for allergen in allergens {
        let name = allergen.trim().to_lowercase();
        let mut keys = vec![name.clone()];
        keys.extend(expand_allergen(&name));
        for key in keys {
            for substitute in taxonomy().substitutes_for(&key) {
                if !out.contains(substitute) {
                    out.push(substitute.clone());
                }
            }
        }
    }
    out
}
