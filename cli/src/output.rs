//! Plain-text rendering of recommendation reports.

use std::fmt::Write;

use flavor_bridge_core::{Recommendation, RecommendationReport, ScoredCandidate};

pub fn render_report(report: &RecommendationReport) -> String {
    let mut out = String::new();
    let diag = &report.diagnostics;

    let _ = writeln!(
        out,
        "{} -> {} ({} candidates, {} filtered{})",
        report.source.title,
        report.target_cuisine,
        diag.candidates_fetched,
        diag.filtered_out,
        if diag.source_resolved {
            ""
        } else {
            ", source dish not in catalog"
        }
    );

    match &report.recommendation {
        Recommendation::Ranked { candidates } => render_candidates(&mut out, candidates),
        Recommendation::FallbackUnfiltered { candidates } => {
            let _ = writeln!(
                out,
                "Every candidate contains an excluded allergen; showing the closest anyway."
            );
            render_candidates(&mut out, candidates);
        }
        Recommendation::NoCandidatesForRegion { target_cuisine } => {
            let _ = writeln!(out, "No recipes found for {}.", target_cuisine);
        }
    }

    out
}

fn render_candidates(out: &mut String, candidates: &[ScoredCandidate]) {
    for (i, candidate) in candidates.iter().enumerate() {
        let m = &candidate.metrics;
        let _ = writeln!(
            out,
            "\n{}. {} (score {:.3})",
            i + 1,
            candidate.title,
            candidate.score
        );
        for reason in &candidate.reasons {
            let _ = writeln!(out, "   - {}", reason);
        }
        let _ = writeln!(
            out,
            "   comfort {:.1}% | flavor {:.1}% | texture {:.1}% | ingredients {:.1}% | adaptability {:.1}%",
            m.comfort_similarity,
            m.flavor_similarity,
            m.texture_alignment,
            m.ingredient_match,
            m.adaptability
        );
    }
}
