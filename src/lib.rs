pub mod config;
pub mod core;
pub mod domain;
pub mod scorers;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LogFormat, Settings, TomlConfig};

pub use core::engine::InferenceEngine;
pub use domain::model::{SimilarityRequest, SimilarityResponse, SimilarityScores, Span};
pub use domain::ports::SimilarityModel;
pub use scorers::placeholder::{compute_similarity, PLACEHOLDER_SIMILARITY};
pub use utils::error::{Result, SimilarityError};
