pub mod composite;
pub mod external;
pub mod features;
pub mod graphlet;
pub mod mapper;
pub mod placeholder;
pub mod stgnn;

use crate::domain::ports::SimilarityModel;
use crate::utils::error::{Result, SimilarityError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub use composite::CompositeModel;
pub use external::ExternalScorer;
pub use graphlet::GraphletModel;
pub use mapper::MapperModel;
pub use placeholder::PlaceholderModel;
pub use stgnn::StgnnModel;

/// Environment variable naming an ST-GNN inference script run with `python3`.
pub const STGNN_INFER_PATH_ENV: &str = "STGNN_INFER_PATH";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[default]
    Placeholder,
    Graphlet,
    Mapper,
    Heuristic,
    Stgnn,
    Composite,
    External,
}

impl ModelKind {
    pub const ALL: &'static [&'static str] = &[
        "placeholder",
        "graphlet",
        "mapper",
        "heuristic",
        "stgnn",
        "composite",
        "external",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Placeholder => "placeholder",
            ModelKind::Graphlet => "graphlet",
            ModelKind::Mapper => "mapper",
            ModelKind::Heuristic => "heuristic",
            ModelKind::Stgnn => "stgnn",
            ModelKind::Composite => "composite",
            ModelKind::External => "external",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(ModelKind::Placeholder),
            "graphlet" => Ok(ModelKind::Graphlet),
            "mapper" => Ok(ModelKind::Mapper),
            "heuristic" => Ok(ModelKind::Heuristic),
            "stgnn" => Ok(ModelKind::Stgnn),
            "composite" => Ok(ModelKind::Composite),
            "external" => Ok(ModelKind::External),
            other => Err(SimilarityError::InvalidConfigValueError {
                field: "model.kind".to_string(),
                value: other.to_string(),
                reason: format!("Unknown model. Valid models: {}", Self::ALL.join(", ")),
            }),
        }
    }
}

/// Command line of an external scorer process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerCommand {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_seconds: Option<u64>,
}

impl ScorerCommand {
    /// `python3 <script>` from `STGNN_INFER_PATH`, if set.
    pub fn from_env() -> Option<Self> {
        let script = std::env::var_os(STGNN_INFER_PATH_ENV)?;
        Some(Self {
            command: "python3".to_string(),
            args: vec![script.to_string_lossy().into_owned()],
            timeout_seconds: None,
        })
    }

    pub fn into_scorer(self) -> ExternalScorer {
        ExternalScorer::new(self.command, self.args)
            .with_timeout(self.timeout_seconds.map(Duration::from_secs))
    }
}

/// Builds the model for `kind`. Only `external` requires a scorer command;
/// `stgnn` and `composite` use one when given.
pub fn build_model(
    kind: ModelKind,
    scorer: Option<ScorerCommand>,
) -> Result<Box<dyn SimilarityModel>> {
    let stgnn = |scorer: Option<ScorerCommand>| match scorer {
        Some(command) => StgnnModel::with_inference(command.into_scorer()),
        None => StgnnModel::heuristic(),
    };

    let model: Box<dyn SimilarityModel> = match kind {
        ModelKind::Placeholder => Box::new(PlaceholderModel),
        ModelKind::Graphlet => Box::new(GraphletModel),
        ModelKind::Mapper => Box::new(MapperModel),
        ModelKind::Heuristic => Box::new(StgnnModel::heuristic()),
        ModelKind::Stgnn => Box::new(stgnn(scorer)),
        ModelKind::Composite => Box::new(CompositeModel::new(stgnn(scorer))),
        ModelKind::External => {
            let command = scorer.ok_or_else(|| SimilarityError::ConfigValidationError {
                field: "external.command".to_string(),
                message: "the external model needs a scorer command".to_string(),
            })?;
            Box::new(command.into_scorer())
        }
    };

    tracing::debug!(model = model.name(), "Built similarity model");
    Ok(model)
}
