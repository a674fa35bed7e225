#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::ports::SimilarityModel;
use crate::scorers::{self, ModelKind, ScorerCommand};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Values given on the command line. Each one wins over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub model: Option<ModelKind>,
    pub scorer: Option<ScorerCommand>,
    pub timeout_seconds: Option<u64>,
    pub verbose: bool,
    pub json_logs: bool,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub model: ModelKind,
    pub scorer: Option<ScorerCommand>,
    pub verbose: bool,
    pub log_format: LogFormat,
}

impl Settings {
    /// Layers command-line overrides over the file. `env_scorer` is only
    /// consulted for models that can delegate to an inference process.
    pub fn merge(
        file: &TomlConfig,
        overrides: Overrides,
        env_scorer: Option<ScorerCommand>,
    ) -> Self {
        let model = overrides
            .model
            .or_else(|| file.model_kind())
            .unwrap_or_default();

        let mut scorer = overrides.scorer.or_else(|| file.scorer_command());
        if scorer.is_none() && matches!(model, ModelKind::Stgnn | ModelKind::Composite) {
            scorer = env_scorer;
        }
        if let (Some(scorer), Some(timeout)) = (scorer.as_mut(), overrides.timeout_seconds) {
            scorer.timeout_seconds = Some(timeout);
        }

        let log_format = if overrides.json_logs || file.log_format() == Some("json") {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };

        Self {
            model,
            scorer,
            verbose: overrides.verbose || file.verbose(),
            log_format,
        }
    }

    pub fn build_model(&self) -> Result<Box<dyn SimilarityModel>> {
        scorers::build_model(self.model, self.scorer.clone())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if self.model == ModelKind::External {
            validation::validate_required_field("external.command", &self.scorer)?;
        }

        if let Some(scorer) = &self.scorer {
            validation::validate_non_empty_string("external.command", &scorer.command)?;
            if let Some(timeout) = scorer.timeout_seconds {
                validation::validate_positive_number("external.timeout_seconds", timeout, 1)?;
            }
        }

        Ok(())
    }
}
