use crate::domain::model::Span;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SimilarityModel: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &str;

    async fn compute_similarity(&self, span_a: &Span, span_b: &Span) -> Result<f64>;
}

#[async_trait]
impl<M: SimilarityModel + ?Sized> SimilarityModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn compute_similarity(&self, span_a: &Span, span_b: &Span) -> Result<f64> {
        (**self).compute_similarity(span_a, span_b).await
    }
}
