//! Golden file tests for profiling and recommendation.
//!
//! Test cases are individual JSON files:
//! - `fixtures/profiles/` - title + steps and the expected extracted features
//! - `fixtures/recommend/` - a request against the bundled sample catalog and
//!   the expected outcome
//!
//! Recommendation format:
//! ```json
//! {
//!   "source": "Chinese-Style Broccoli Salad",
//!   "cuisine": "Italian",
//!   "exclude": [],
//!   "expected": { "outcome": "ranked", "titles": [...], "source_resolved": true, ... }
//! }
//! ```

use flavor_bridge_core::recommend::LOW_CONFIDENCE_WARNING;
use flavor_bridge_core::{
    build_profile, recommend, CatalogProvider, CookingMethod, Recommendation, RecommendConfig,
    RecommendationReport,
};
use glob::glob;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct ProfileCase {
    title: String,
    steps: Vec<String>,
    expected: ExpectedProfile,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
struct ExpectedProfile {
    method: CookingMethod,
    protein: String,
    ingredients_from_title: Vec<String>,
    ingredients_extracted: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecommendCase {
    source: String,
    cuisine: String,
    exclude: Vec<String>,
    expected: ExpectedOutcome,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
struct ExpectedOutcome {
    outcome: String,
    titles: Vec<String>,
    source_resolved: bool,
    filtered_out: usize,
    low_confidence: bool,
}

impl From<RecommendationReport> for ExpectedOutcome {
    fn from(report: RecommendationReport) -> Self {
        let outcome = match &report.recommendation {
            Recommendation::Ranked { .. } => "ranked",
            Recommendation::FallbackUnfiltered { .. } => "fallback_unfiltered",
            Recommendation::NoCandidatesForRegion { .. } => "no_candidates_for_region",
        }
        .to_string();
        let source_resolved = report.diagnostics.source_resolved;
        let filtered_out = report.diagnostics.filtered_out;
        let low_confidence = report
            .candidates()
            .iter()
            .any(|c| c.reasons.first().map(String::as_str) == Some(LOW_CONFIDENCE_WARNING));
        let titles = report
            .into_candidates()
            .into_iter()
            .map(|c| c.title)
            .collect();

        Self {
            outcome,
            titles,
            source_resolved,
            filtered_out,
            low_confidence,
        }
    }
}

fn load_cases<T: DeserializeOwned>(subdir: &str) -> Vec<(String, T)> {
    let pattern = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(subdir)
        .join("*.json");
    let pattern_str = pattern.to_string_lossy();

    let mut cases = Vec::new();
    for entry in glob(&pattern_str).expect("Failed to read glob pattern") {
        let path = entry.expect("Failed to read directory entry");
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let case: T = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        cases.push((name, case));
    }

    // Sort by name for deterministic ordering
    cases.sort_by(|a, b| a.0.cmp(&b.0));
    cases
}

fn report_failures<E: std::fmt::Debug>(kind: &str, total: usize, failures: &[(String, E, E)]) {
    if failures.is_empty() {
        return;
    }
    let mut msg = format!("\n{} failures across {} {} tests:\n", failures.len(), total, kind);
    for (name, expected, actual) in failures {
        msg.push_str(&format!("\n=== {} ===\n", name));
        msg.push_str(&format!("Expected: {:#?}\n", expected));
        msg.push_str(&format!("Actual:   {:#?}\n", actual));
    }
    panic!("{}", msg);
}

#[test]
fn test_profile_golden_files() {
    let cases: Vec<(String, ProfileCase)> = load_cases("profiles");
    assert!(!cases.is_empty(), "no profile fixtures found");

    let mut failures = Vec::new();
    for (name, case) in &cases {
        let profile = build_profile(&case.title, &case.steps);
        let actual = ExpectedProfile {
            method: profile.method,
            protein: profile.protein,
            ingredients_from_title: profile.ingredients_from_title,
            ingredients_extracted: profile.ingredients_extracted.into_iter().collect(),
        };
        if actual != case.expected {
            failures.push((name.clone(), case.expected.clone(), actual));
        }
    }

    report_failures("profile", cases.len(), &failures);
}

#[tokio::test]
async fn test_recommend_golden_files() {
    let cases: Vec<(String, RecommendCase)> = load_cases("recommend");
    assert!(!cases.is_empty(), "no recommend fixtures found");

    let provider = CatalogProvider::sample().expect("sample catalog parses");
    let config = RecommendConfig::default();

    let mut failures = Vec::new();
    for (name, case) in &cases {
        let report = recommend(&provider, &case.source, &case.cuisine, &case.exclude, &config).await;
        let actual = ExpectedOutcome::from(report);
        if actual != case.expected {
            failures.push((name.clone(), case.expected.clone(), actual));
        }
    }

    report_failures("recommend", cases.len(), &failures);
}

#[tokio::test]
async fn every_sample_region_yields_results() {
    let provider = CatalogProvider::sample().unwrap();
    let config = RecommendConfig::default();
    for cuisine in [
        "Chinese and Mongolian",
        "Korean",
        "Italian",
        "Thai",
        "Northern Africa",
        "Middle Eastern",
        "Indian Subcontinent",
        "Rest Africa",
    ] {
        let report = recommend(&provider, "Egyptian Lentil Soup", cuisine, &[], &config).await;
        let candidates = report.candidates();
        assert!(!candidates.is_empty(), "{} returned nothing", cuisine);
        assert!(candidates.len() <= 3);
        assert!(candidates
            .iter()
            .all(|c| (0.0..=1.0).contains(&c.score)));
        assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
