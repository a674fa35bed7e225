use crate::core::codec;
use crate::domain::model::{SimilarityRequest, Span};
use crate::domain::ports::SimilarityModel;
use crate::utils::error::{Result, SimilarityError};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Delegates scoring to another process over the stdin/stdout protocol:
/// `{"span_a": ..., "span_b": ...}` in, `{"similarity": <number>}` out.
#[derive(Debug, Clone)]
pub struct ExternalScorer {
    label: String,
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ExternalScorer {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            label: "external".to_string(),
            command: command.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn infer(&self, request: &SimilarityRequest) -> Result<f64> {
        let payload = codec::encode_request(request)?;

        tracing::debug!(
            scorer = %self.label,
            command = %self.command,
            args = ?self.args,
            bytes = payload.len(),
            "Spawning external scorer"
        );

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.failure(format!("failed to spawn '{}': {}", self.command, e)))?;

        // Feed stdin while draining stdout and stderr so a chatty scorer
        // cannot block on a full pipe.
        let stdin = child.stdin.take();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(&payload).await {
                Ok(()) => Ok(()),
                // The scorer may answer without reading its input.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!("External scorer closed stdin early");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        };
        let exchange = async move {
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            fed?;
            output
        };

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange).await.map_err(|_| {
                SimilarityError::ScorerTimeout {
                    scorer: self.label.clone(),
                    seconds: limit.as_secs(),
                }
            })?,
            None => exchange.await,
        }
        .map_err(|e| self.failure(format!("failed to read scorer output: {}", e)))?;

        if !output.status.success() {
            return Err(self.failure(format!(
                "process exited with status {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let similarity = codec::parse_response(&output.stdout)
            .map_err(|e| self.failure(format!("invalid response: {}", e)))?;

        Ok(similarity.clamp(0.0, 1.0))
    }

    fn failure(&self, message: String) -> SimilarityError {
        SimilarityError::ScorerError {
            scorer: self.label.clone(),
            message,
        }
    }
}

#[async_trait]
impl SimilarityModel for ExternalScorer {
    fn name(&self) -> &str {
        &self.label
    }

    async fn compute_similarity(&self, span_a: &Span, span_b: &Span) -> Result<f64> {
        let request = SimilarityRequest::new(span_a.clone(), span_b.clone());
        self.infer(&request).await
    }
}
