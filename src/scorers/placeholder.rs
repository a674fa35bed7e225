use crate::domain::model::Span;
use crate::domain::ports::SimilarityModel;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Score returned until ST-GNN inference is wired in.
pub const PLACEHOLDER_SIMILARITY: f64 = 0.42;

/// Ignores both spans and returns [`PLACEHOLDER_SIMILARITY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderModel;

pub fn compute_similarity(_span_a: &Span, _span_b: &Span) -> f64 {
    PLACEHOLDER_SIMILARITY
}

#[async_trait]
impl SimilarityModel for PlaceholderModel {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn compute_similarity(&self, span_a: &Span, span_b: &Span) -> Result<f64> {
        Ok(compute_similarity(span_a, span_b))
    }
}
