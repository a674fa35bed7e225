use crate::domain::model::Span;
use crate::domain::ports::SimilarityModel;
use crate::scorers::features::{distribution_overlap, resolve_array, resolve_number, value_to_number};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

const GRAPHLET_PATHS: &[&str] = &[
    "analysis.graphlet_histogram",
    "analysis.graphlet_distribution",
    "graphlet_histogram",
    "graphlet_distribution",
    "metadata.graphlet_histogram",
    "metadata.graphlets",
    "graphlets",
];

const FALLBACK_PATHS: &[&str] = &[
    "results.final_rmsd_angstrom",
    "results.final_energy_kcal_mol",
    "execution.simulation_time_ns",
    "execution.performance_ns_per_day",
];

/// Compares graphlet histograms, or a handful of run metrics when neither
/// span carries a histogram.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphletModel;

pub fn graphlet_score(a: &Value, b: &Value) -> f64 {
    let hist_a = extract_histogram(a);
    let hist_b = extract_histogram(b);

    if !hist_a.is_empty() || !hist_b.is_empty() {
        return distribution_overlap(&hist_a, &hist_b);
    }

    let fallback_a = extract_fallback(a);
    let fallback_b = extract_fallback(b);
    if fallback_a.is_empty() || fallback_b.is_empty() {
        return 0.0;
    }

    distribution_overlap(&fallback_a, &fallback_b)
}

fn extract_histogram(span: &Value) -> Vec<f64> {
    GRAPHLET_PATHS
        .iter()
        .filter_map(|path| resolve_array(span, path))
        .map(|values| values.iter().filter_map(value_to_number).collect::<Vec<_>>())
        .find(|series| !series.is_empty())
        .unwrap_or_default()
}

fn extract_fallback(span: &Value) -> Vec<f64> {
    FALLBACK_PATHS
        .iter()
        .filter_map(|path| resolve_number(span, path))
        .collect()
}

#[async_trait]
impl SimilarityModel for GraphletModel {
    fn name(&self) -> &str {
        "graphlet"
    }

    async fn compute_similarity(&self, span_a: &Span, span_b: &Span) -> Result<f64> {
        Ok(graphlet_score(&span_a.to_value()?, &span_b.to_value()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identical_histograms_yield_one() {
        let payload = json!({"analysis": {"graphlet_histogram": [1.0, 2.0, 3.0]}});
        let score = graphlet_score(&payload, &payload);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_differing_histograms_reduce_score() {
        let a = json!({"analysis": {"graphlet_histogram": [5.0, 1.0, 0.0]}});
        let b = json!({"analysis": {"graphlet_histogram": [1.0, 3.0, 2.0]}});
        assert!(graphlet_score(&a, &b) < 0.8);
    }

    #[test]
    fn test_later_paths_and_numeric_strings_are_used() {
        let a = json!({"metadata": {"graphlets": ["2", "2"]}});
        let b = json!({"graphlets": [1, 1]});
        assert!((graphlet_score(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_one_sided_histogram_compares_against_empty() {
        let a = json!({"graphlet_histogram": [1.0, 2.0]});
        assert!((graphlet_score(&a, &json!({})) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_uses_structural_features() {
        let payload = json!({
            "results": {"final_rmsd_angstrom": 0.6, "final_energy_kcal_mol": -120.0},
            "execution": {"simulation_time_ns": 0.5}
        });
        assert!(graphlet_score(&payload, &payload) > 0.9);
    }

    #[test]
    fn test_no_features_scores_zero() {
        assert_eq!(graphlet_score(&json!({}), &json!({"id": 1})), 0.0);
    }
}
