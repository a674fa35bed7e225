use crate::core::codec;
use crate::domain::model::{SimilarityRequest, SimilarityResponse};
use crate::domain::ports::SimilarityModel;
use crate::utils::error::Result;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Runs one request/response cycle: read everything, score, write once.
pub struct InferenceEngine<M: SimilarityModel> {
    model: M,
}

impl<M: SimilarityModel> InferenceEngine<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub async fn score(&self, request: &SimilarityRequest) -> Result<SimilarityResponse> {
        let similarity = self
            .model
            .compute_similarity(&request.span_a, &request.span_b)
            .await?;
        tracing::debug!(model = self.model.name(), similarity, "Computed similarity");
        Ok(SimilarityResponse { similarity })
    }

    pub async fn run<R, W>(&self, mut input: R, mut output: W) -> Result<SimilarityResponse>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut raw = Vec::new();
        input.read_to_end(&mut raw).await?;
        tracing::debug!(bytes = raw.len(), "Read request");

        let request = codec::parse_request(&raw)?;
        let response = self.score(&request).await?;

        // Nothing reaches the output unless scoring succeeded.
        let encoded = codec::encode_response(&response)?;
        output.write_all(&encoded).await?;
        output.flush().await?;

        Ok(response)
    }
}
