pub mod codec;
pub mod engine;

pub use crate::domain::model::{SimilarityRequest, SimilarityResponse, SimilarityScores, Span};
pub use crate::domain::ports::SimilarityModel;
pub use crate::utils::error::Result;
