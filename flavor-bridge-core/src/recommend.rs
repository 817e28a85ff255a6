//! Recommendation orchestrator: resolve the source dish, fetch candidates for
//! the target cuisine, filter allergens, score, rank.
//!
//! Nothing in here fails. Provider errors and timeouts are logged and degrade to
//! an unresolved source or an empty region, and every degraded path still
//! produces an explained [`RecommendationReport`].

use std::cmp::Ordering;
use std::future::Future;

use serde::Serialize;
use tokio::time::timeout;
use tracing::{info_span, Instrument};

use crate::allergen::{matched_allergens, suggest_substitutes};
use crate::config::RecommendConfig;
use crate::error::ProviderError;
use crate::profile::{build_profile, profile_record};
use crate::provider::RecipeProvider;
use crate::scoring::score;
use crate::types::{DetailedMetrics, RecipeProfile, RecipeRecord, ScoredCandidate, DEFAULT_STEP};

/// Candidates returned unfiltered when every candidate contained an excluded allergen.
pub const FALLBACK_LIMIT: usize = 3;

pub const LOW_CONFIDENCE_WARNING: &str =
    "Low confidence: no close match found in this cuisine, showing the nearest dishes";

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Recommendation {
    Ranked { candidates: Vec<ScoredCandidate> },
    /// Every candidate was allergen-filtered; these are returned anyway, flagged.
    FallbackUnfiltered { candidates: Vec<ScoredCandidate> },
    NoCandidatesForRegion { target_cuisine: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// The provider knew the source dish; otherwise a title-only profile was used
    pub source_resolved: bool,
    pub candidates_fetched: usize,
    pub filtered_out: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub source: RecipeProfile,
    pub target_cuisine: String,
    pub recommendation: Recommendation,
    pub diagnostics: Diagnostics,
}

impl RecommendationReport {
    /// Ranked candidates, empty when the region had none.
    pub fn candidates(&self) -> &[ScoredCandidate] {
        match &self.recommendation {
            Recommendation::Ranked { candidates }
            | Recommendation::FallbackUnfiltered { candidates } => candidates,
            Recommendation::NoCandidatesForRegion { .. } => &[],
        }
    }

    /// Flatten into the caller-facing list. An empty region becomes a single
    /// zero-score "no recipes found" entry.
    pub fn into_candidates(self) -> Vec<ScoredCandidate> {
        match self.recommendation {
            Recommendation::Ranked { candidates }
            | Recommendation::FallbackUnfiltered { candidates } => candidates,
            Recommendation::NoCandidatesForRegion { target_cuisine } => {
                vec![no_recipes_found(&target_cuisine)]
            }
        }
    }
}

fn no_recipes_found(cuisine: &str) -> ScoredCandidate {
    ScoredCandidate {
        title: format!("No recipes found for {}", cuisine),
        score: 0.0,
        reasons: vec![format!(
            "The recipe source returned no dishes for the {} cuisine",
            cuisine
        )],
        metrics: DetailedMetrics::default(),
        no_match_fallback: false,
    }
}

fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Run a provider call under the configured timeout. Failures are logged and
/// reported as `None`.
async fn bounded<T>(
    config: &RecommendConfig,
    what: &'static str,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Option<T> {
    match timeout(config.provider_timeout, call).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, what, "recipe provider call failed");
            None
        }
        Err(_) => {
            let e = ProviderError::Timeout(config.provider_timeout);
            tracing::warn!(error = %e, what, "recipe provider call timed out");
            None
        }
    }
}

async fn resolve_source(
    provider: &dyn RecipeProvider,
    title: &str,
    config: &RecommendConfig,
) -> (RecipeProfile, bool) {
    match bounded(config, "source", provider.fetch_recipe_by_title(title)).await {
        Some(Some(record)) => {
            tracing::debug!(resolved = %record.title, "source dish resolved");
            (profile_record(&record), true)
        }
        Some(None) | None => {
            tracing::info!(title, "source dish not resolved, profiling title only");
            (build_profile(title, &[DEFAULT_STEP.to_string()]), false)
        }
    }
}

fn to_candidate(source: &RecipeProfile, target: &RecipeProfile) -> ScoredCandidate {
    let breakdown = score(source, target);
    ScoredCandidate {
        title: target.title.clone(),
        score: round_score(breakdown.score),
        reasons: breakdown.reasons,
        metrics: breakdown.metrics,
        no_match_fallback: false,
    }
}

fn allergen_reason(matched: &[String]) -> String {
    let mut reason = format!("Contains excluded allergen(s): {}", matched.join(", "));
    let substitutes = suggest_substitutes(matched);
    if !substitutes.is_empty() {
        let names: Vec<&str> = substitutes.iter().map(|s| s.name.as_str()).collect();
        reason.push_str(&format!("; consider substitutes: {}", names.join(", ")));
    }
    reason
}

fn rank(candidates: &mut Vec<ScoredCandidate>, top_n: usize) {
    // sort_by is stable: equal scores keep provider order
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(top_n.max(1));
}

fn warn_if_low_confidence(candidates: &mut [ScoredCandidate], threshold: f64) {
    let best = candidates.first().map(|c| c.score).unwrap_or(0.0);
    if best < threshold {
        for candidate in candidates.iter_mut() {
            candidate.reasons.insert(0, LOW_CONFIDENCE_WARNING.to_string());
        }
    }
}

/// Score already-fetched candidates against a source profile.
///
/// This is the synchronous core of [`recommend`]: allergen filtering, the
/// unfiltered fallback, ranking and the low-confidence warning.
pub fn rank_candidates(
    source: &RecipeProfile,
    records: &[RecipeRecord],
    target_cuisine: &str,
    excluded: &[String],
    config: &RecommendConfig,
) -> (Recommendation, usize) {
    if records.is_empty() {
        return (
            Recommendation::NoCandidatesForRegion {
                target_cuisine: target_cuisine.to_string(),
            },
            0,
        );
    }

    let profiles: Vec<RecipeProfile> = records.iter().map(profile_record).collect();

    let mut survivors = Vec::new();
    let mut rejected = Vec::new();
    for profile in &profiles {
        let matched = matched_allergens(&profile.all_ingredients(), excluded);
        if matched.is_empty() {
            survivors.push(profile);
        } else {
            tracing::debug!(title = %profile.title, ?matched, "candidate filtered");
            rejected.push((profile, matched));
        }
    }
    let filtered_out = rejected.len();

    if survivors.is_empty() {
        tracing::info!(filtered_out, "all candidates filtered, returning unfiltered fallback");
        let mut candidates: Vec<ScoredCandidate> = rejected
            .iter()
            .take(FALLBACK_LIMIT)
            .map(|(profile, matched)| {
                let mut candidate = to_candidate(source, profile);
                candidate.reasons.push(allergen_reason(matched));
                candidate.no_match_fallback = true;
                candidate
            })
            .collect();
        rank(&mut candidates, config.top_n);
        warn_if_low_confidence(&mut candidates, config.low_confidence_threshold);
        return (Recommendation::FallbackUnfiltered { candidates }, filtered_out);
    }

    let mut candidates: Vec<ScoredCandidate> = survivors
        .iter()
        .map(|profile| to_candidate(source, profile))
        .collect();
    rank(&mut candidates, config.top_n);
    warn_if_low_confidence(&mut candidates, config.low_confidence_threshold);
    (Recommendation::Ranked { candidates }, filtered_out)
}

/// Recommend dishes from `target_cuisine` closest to `source_title`.
pub async fn recommend(
    provider: &dyn RecipeProvider,
    source_title: &str,
    target_cuisine: &str,
    excluded: &[String],
    config: &RecommendConfig,
) -> RecommendationReport {
    let span = info_span!(
        "recommend",
        source = source_title,
        cuisine = target_cuisine,
        provider = provider.provider_name()
    );

    async move {
        let (source, source_resolved) = resolve_source(provider, source_title, config).await;

        let records = bounded(
            config,
            "region",
            provider.fetch_recipes_by_region(target_cuisine, config.region_limit),
        )
        .await
        .unwrap_or_default();

        let (recommendation, filtered_out) =
            rank_candidates(&source, &records, target_cuisine, excluded, config);

        let diagnostics = Diagnostics {
            source_resolved,
            candidates_fetched: records.len(),
            filtered_out,
        };
        tracing::info!(
            fetched = diagnostics.candidates_fetched,
            filtered_out,
            source_resolved,
            "recommendation complete"
        );

        RecommendationReport {
            source,
            target_cuisine: target_cuisine.to_string(),
            recommendation,
            diagnostics,
        }
    }
    .instrument(span)
    .await
}
