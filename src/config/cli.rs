use crate::config::{Overrides, Settings, TomlConfig};
use crate::scorers::{ModelKind, ScorerCommand};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

/// With no arguments, reads `{"span_a": ..., "span_b": ...}` from stdin and
/// writes `{"similarity": <score>}` to stdout using the placeholder model.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "stgnn-infer")]
#[command(about = "Scores the similarity of two spans read as JSON from stdin")]
pub struct CliConfig {
    /// Similarity model: placeholder, graphlet, mapper, heuristic, stgnn, composite, external
    #[arg(short, long)]
    pub model: Option<ModelKind>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Program implementing the stdin/stdout scoring protocol
    #[arg(long)]
    pub scorer_command: Option<String>,

    /// Argument passed to the scorer program (repeatable)
    #[arg(long = "scorer-arg", allow_hyphen_values = true)]
    pub scorer_args: Vec<String>,

    /// Seconds to wait for the scorer program
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model,
            scorer: self.scorer_command.as_ref().map(|command| ScorerCommand {
                command: command.clone(),
                args: self.scorer_args.clone(),
                timeout_seconds: None,
            }),
            timeout_seconds: self.timeout_seconds,
            verbose: self.verbose,
            json_logs: self.json_logs,
        }
    }

    /// Reads the optional config file and layers the flags over it.
    pub fn load(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let settings = Settings::merge(&file, self.overrides(), ScorerCommand::from_env());
        settings.validate()?;
        Ok(settings)
    }
}
