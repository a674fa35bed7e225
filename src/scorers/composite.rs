use crate::domain::model::{SimilarityScores, Span};
use crate::domain::ports::SimilarityModel;
use crate::scorers::graphlet::graphlet_score;
use crate::scorers::mapper::mapper_overlap;
use crate::scorers::stgnn::StgnnModel;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Averages the graphlet, Mapper and ST-GNN scores.
#[derive(Debug, Clone, Default)]
pub struct CompositeModel {
    stgnn: StgnnModel,
}

impl CompositeModel {
    pub fn new(stgnn: StgnnModel) -> Self {
        Self { stgnn }
    }

    pub async fn scores(&self, span_a: &Span, span_b: &Span) -> Result<SimilarityScores> {
        let (value_a, value_b) = (span_a.to_value()?, span_b.to_value()?);
        Ok(SimilarityScores {
            graphlet: Some(graphlet_score(&value_a, &value_b)),
            mapper_overlap: Some(mapper_overlap(&value_a, &value_b)),
            stgnn: Some(self.stgnn.compute_similarity(span_a, span_b).await?),
        })
    }
}

#[async_trait]
impl SimilarityModel for CompositeModel {
    fn name(&self) -> &str {
        "composite"
    }

    async fn compute_similarity(&self, span_a: &Span, span_b: &Span) -> Result<f64> {
        let scores = self.scores(span_a, span_b).await?;
        tracing::debug!(?scores, "Composite breakdown");
        Ok(scores.composite().unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_identical_rich_spans_score_one() {
        let payload = Span::from_value(&json!({
            "analysis": {
                "graphlet_histogram": [1, 2, 3],
                "mapper": {"nodes": [{"size": 4, "density": 0.5}]}
            },
            "results": {"final_rmsd_angstrom": 0.7}
        }))
        .unwrap();
        let model = CompositeModel::default();
        let scores = model.scores(&payload, &payload).await.unwrap();
        assert!((scores.graphlet.unwrap() - 1.0).abs() < 1e-9);
        assert!((scores.mapper_overlap.unwrap() - 1.0).abs() < 1e-9);
        assert!((scores.stgnn.unwrap() - 1.0).abs() < 1e-9);

        let score = model.compute_similarity(&payload, &payload).await.unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_spans_only_match_on_stgnn() {
        let model = CompositeModel::default();
        let score = model
            .compute_similarity(&Span::default(), &Span::default())
            .await
            .unwrap();
        // graphlet 0, mapper 0, heuristic 1
        assert!((score - 1.0 / 3.0).abs() < 1e-9);
    }
}
