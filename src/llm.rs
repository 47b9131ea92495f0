use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info, warn};

use crate::config::CONFIG;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model timed out")]
    Timeout,
    #[error("model process failed: {0}")]
    Runtime(String),
    #[error("model invocation failed: {0}")]
    Internal(String),
}

impl ModelError {
    /// Inline placeholder shown to users when a model call fails. The chat
    /// path embeds this as ordinary conversational text.
    pub fn user_message(&self) -> String {
        match self {
            ModelError::Timeout => "⚠️ Timeout from model after retries.".to_string(),
            ModelError::Runtime(stderr) => format!("⚠️ Model error: {stderr}"),
            ModelError::Internal(msg) => format!("⚠️ Exception: {msg}"),
        }
    }
}

/// Seam for anything that needs a model response. Each call must be an
/// isolated invocation with no state shared between in-flight calls.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(
        &self,
        prompt: &str,
        timeout: Duration,
        max_attempts: u32,
    ) -> Result<String, ModelError>;
}

/// Runs the local inference executable once per call, feeding the prompt on
/// stdin and reading the reply from stdout. The default configuration runs
/// `ollama run <model>`.
pub struct ProcessModelInvoker {
    program: String,
    args: Vec<String>,
}

impl ProcessModelInvoker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config() -> Self {
        Self::new(
            &CONFIG.model_command,
            vec!["run".to_string(), CONFIG.model_name.clone()],
        )
    }

    async fn run_once(&self, prompt: &str, timeout: Duration) -> Result<String, ModelError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // reaps the child if the timeout abandons the wait below
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ModelError::Internal(format!("failed to spawn {}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ModelError::Internal("child stdin unavailable".to_string()))?;
        stdin
            .write_all(prompt.as_bytes())
            .await
            .map_err(|e| ModelError::Internal(format!("failed to write prompt: {e}")))?;
        // close stdin so the model knows the prompt is complete
        drop(stdin);

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Err(_) => return Err(ModelError::Timeout),
            Ok(Err(e)) => {
                return Err(ModelError::Internal(format!("failed to collect output: {e}")));
            }
            Ok(Ok(output)) => output,
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(ModelError::Runtime(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

#[async_trait]
impl ModelInvoker for ProcessModelInvoker {
    async fn invoke(
        &self,
        prompt: &str,
        timeout: Duration,
        max_attempts: u32,
    ) -> Result<String, ModelError> {
        let max_attempts = max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match self.run_once(prompt, timeout).await {
                Ok(response) => {
                    info!(program = %self.program, attempt, "model generated response");
                    return Ok(response);
                }
                // only timeouts are retried; a failed process stays failed
                Err(ModelError::Timeout) if attempt < max_attempts => {
                    warn!(program = %self.program, attempt, "model timed out, retrying");
                }
                Err(ModelError::Timeout) => {
                    warn!(program = %self.program, attempt, "model timed out, attempts exhausted");
                    return Err(ModelError::Timeout);
                }
                Err(e) => {
                    error!(program = %self.program, attempt, %e, "model invocation failed");
                    return Err(e);
                }
            }
        }
        unreachable!("retry loop returns on the final attempt")
    }
}
