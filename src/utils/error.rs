use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimilarityError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Malformed input: {message}")]
    MalformedRequest { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Scorer '{scorer}' failed: {message}")]
    ScorerError { scorer: String, message: String },

    #[error("Scorer '{scorer}' timed out after {seconds}s")]
    ScorerTimeout { scorer: String, seconds: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Scorer,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a failure of this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SimilarityError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SimilarityError::MalformedInput(_) | SimilarityError::MalformedRequest { .. } => {
                ErrorCategory::Input
            }
            SimilarityError::ConfigError { .. }
            | SimilarityError::ConfigValidationError { .. }
            | SimilarityError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SimilarityError::ScorerError { .. } | SimilarityError::ScorerTimeout { .. } => {
                ErrorCategory::Scorer
            }
            SimilarityError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Scorer => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SimilarityError::MalformedInput(_) | SimilarityError::MalformedRequest { .. } => {
                "Send a single JSON object such as {\"span_a\": {...}, \"span_b\": {...}} on stdin"
            }
            SimilarityError::ConfigError { .. }
            | SimilarityError::ConfigValidationError { .. }
            | SimilarityError::InvalidConfigValueError { .. } => {
                "Check the command-line flags and the TOML configuration file"
            }
            SimilarityError::ScorerError { .. } => {
                "Verify the external scorer command runs and prints {\"similarity\": <number>}"
            }
            SimilarityError::ScorerTimeout { .. } => {
                "Raise timeout_seconds or check that the external scorer reads all of stdin"
            }
            SimilarityError::IoError(_) => "Check that stdin and stdout are readable and writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SimilarityError::MalformedInput(e) => format!("Input is not valid JSON: {}", e),
            SimilarityError::MalformedRequest { message } => {
                format!("Input is not a similarity request: {}", message)
            }
            SimilarityError::ScorerTimeout { scorer, seconds } => {
                format!("The {} scorer did not answer within {}s", scorer, seconds)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimilarityError>;
