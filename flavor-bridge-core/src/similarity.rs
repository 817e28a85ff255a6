//! Similarity measures between profile features.
//!
//! Flavor and texture vectors treat missing data as neutral (0.5), while ingredient
//! sets treat missing data as no evidence (0.0).

use std::collections::BTreeSet;

use crate::types::WeightedVector;

/// Returned by [`cosine_similarity`] when either side carries no signal.
pub const NEUTRAL_SIMILARITY: f64 = 0.5;

/// Cosine similarity over the union of keys, clamped to [0, 1].
pub fn cosine_similarity(a: &WeightedVector, b: &WeightedVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return NEUTRAL_SIMILARITY;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(tag, wa)| b.get(tag).map(|wb| wa * wb))
        .sum();
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);

    if mag_a == 0.0 || mag_b == 0.0 {
        return NEUTRAL_SIMILARITY;
    }

    (dot / (mag_a * mag_b)).clamp(0.0, 1.0)
}

fn magnitude(v: &WeightedVector) -> f64 {
    v.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// |A ∩ B| / |A ∪ B|, or 0.0 when either set is empty.
pub fn jaccard_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// 1 - |x - y|, for values already in [0, 1].
pub fn scalar_closeness(x: f64, y: f64) -> f64 {
    (1.0 - (x - y).abs()).clamp(0.0, 1.0)
}

/// Scale each weight so the vector sums to 1. Zero and negative weights are dropped.
pub fn l1_normalize(vector: WeightedVector) -> WeightedVector {
    let positive: WeightedVector = vector.into_iter().filter(|(_, w)| *w > 0.0).collect();
    let total: f64 = positive.values().sum();
    if total == 0.0 {
        return WeightedVector::new();
    }
    positive.into_iter().map(|(k, w)| (k, w / total)).collect()
}
