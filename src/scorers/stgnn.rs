use crate::domain::model::{SimilarityRequest, Span};
use crate::domain::ports::SimilarityModel;
use crate::scorers::external::ExternalScorer;
use crate::scorers::features::resolve_number;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Run metrics compared by the heuristic; a missing metric counts as zero.
const FEATURE_PATHS: &[&str] = &[
    "results.final_rmsd_angstrom",
    "results.final_energy_kcal_mol",
    "execution.simulation_time_ns",
    "execution.performance_ns_per_day",
    "analysis.mean_energy",
    "analysis.max_rmsd",
];

/// ST-GNN similarity. Uses an inference process when one is configured and a
/// deterministic feature heuristic otherwise.
#[derive(Debug, Clone, Default)]
pub struct StgnnModel {
    inference: Option<ExternalScorer>,
}

impl StgnnModel {
    pub fn heuristic() -> Self {
        Self { inference: None }
    }

    pub fn with_inference(scorer: ExternalScorer) -> Self {
        Self {
            inference: Some(scorer.with_label("stgnn")),
        }
    }

    pub fn uses_inference(&self) -> bool {
        self.inference.is_some()
    }
}

pub fn heuristic_similarity(a: &Value, b: &Value) -> f64 {
    let diff: f64 = extract_features(a)
        .iter()
        .zip(extract_features(b).iter())
        .map(|(x, y)| (x - y).abs())
        .sum();

    (1.0 / (1.0 + diff)).clamp(0.0, 1.0)
}

fn extract_features(span: &Value) -> Vec<f64> {
    FEATURE_PATHS
        .iter()
        .map(|path| resolve_number(span, path).unwrap_or(0.0))
        .collect()
}

#[async_trait]
impl SimilarityModel for StgnnModel {
    fn name(&self) -> &str {
        "stgnn"
    }

    async fn compute_similarity(&self, span_a: &Span, span_b: &Span) -> Result<f64> {
        match &self.inference {
            Some(scorer) => {
                let request = SimilarityRequest::new(span_a.clone(), span_b.clone());
                scorer.infer(&request).await
            }
            None => Ok(heuristic_similarity(&span_a.to_value()?, &span_b.to_value()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SimilarityError;
    use serde_json::json;

    #[test]
    fn test_identical_features_yield_one() {
        let payload = json!({
            "results": {"final_rmsd_angstrom": 0.5, "final_energy_kcal_mol": -100.0}
        });
        assert!((heuristic_similarity(&payload, &payload) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_drops_with_feature_distance() {
        let a = json!({
            "results": {"final_rmsd_angstrom": 0.4, "final_energy_kcal_mol": -95.0},
            "execution": {"simulation_time_ns": 0.2}
        });
        let b = json!({
            "results": {"final_rmsd_angstrom": 1.5, "final_energy_kcal_mol": -60.0},
            "execution": {"simulation_time_ns": 1.0}
        });
        assert!(heuristic_similarity(&a, &b) < 0.5);
    }

    #[tokio::test]
    async fn test_without_inference_uses_heuristic() {
        let model = StgnnModel::heuristic();
        assert!(!model.uses_inference());
        let score = model
            .compute_similarity(
                &Span::default(),
                &Span::from_json(r#"{"analysis": {"max_rmsd": 1.0}}"#).unwrap(),
            )
            .await
            .unwrap();
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_heuristic_rejects_spans_it_cannot_read() {
        let model = StgnnModel::heuristic();
        let huge = Span::from_json(r#"{"results": {"final_rmsd_angstrom": 1e400}}"#).unwrap();
        let err = model
            .compute_similarity(&huge, &Span::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SimilarityError::MalformedInput(_)));
    }

    #[test]
    fn test_inference_scorer_is_relabelled() {
        let model = StgnnModel::with_inference(ExternalScorer::new("python3", vec![]));
        assert!(model.uses_inference());
        assert_eq!(model.inference.as_ref().unwrap().name(), "stgnn");
    }
}
