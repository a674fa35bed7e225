use crate::scorers::{ModelKind, ScorerCommand};
use crate::utils::error::{Result, SimilarityError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub model: Option<ModelConfig>,
    pub external: Option<ExternalConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub kind: ModelKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<String>,
}

pub const LOG_FORMATS: &[&str] = &["compact", "json"];

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SimilarityError::ConfigError {
            message: format!("cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SimilarityError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SimilarityError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn model_kind(&self) -> Option<ModelKind> {
        self.model.as_ref().map(|m| m.kind)
    }

    pub fn scorer_command(&self) -> Option<ScorerCommand> {
        self.external.as_ref().map(|external| ScorerCommand {
            command: external.command.clone(),
            args: external.args.clone(),
            timeout_seconds: external.timeout_seconds,
        })
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|logging| logging.verbose)
            .unwrap_or(false)
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|logging| logging.format.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(external) = &self.external {
            validation::validate_non_empty_string("external.command", &external.command)?;
            if let Some(timeout) = external.timeout_seconds {
                validation::validate_positive_number("external.timeout_seconds", timeout, 1)?;
            }
        }

        if let Some(format) = self.log_format() {
            validation::validate_one_of("logging.format", format, LOG_FORMATS)?;
        }

        if self.model_kind() == Some(ModelKind::External) {
            validation::validate_required_field("external", &self.external)?;
        }

        Ok(())
    }
}
