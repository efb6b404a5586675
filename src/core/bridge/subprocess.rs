//! Process-boundary backend
//!
//! Spawns the `grok-search` helper (or any program speaking the same
//! contract: one outcome JSON document on stdout) and classifies the
//! result. The child is killed when the timeout fires.

use super::SearchBackend;
use crate::core::error::SearchError;
use crate::core::types::SearchOutcome;
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Default outer bound for one helper run
pub const DEFAULT_PROCESS_TIMEOUT: Duration = Duration::from_secs(120);

/// Backend that delegates each query to a helper process
#[derive(Debug, Clone)]
pub struct SubprocessSearch {
    program: PathBuf,
    args: Vec<String>,
    config_path: Option<PathBuf>,
    timeout: Duration,
}

impl SubprocessSearch {
    /// Create a backend running `program` with leading `args`
    ///
    /// `--query <q>` (and `--config <path>` when set) are appended per call.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            config_path: None,
            timeout: DEFAULT_PROCESS_TIMEOUT,
        }
    }

    pub fn with_config_path(mut self, config_path: Option<PathBuf>) -> Self {
        self.config_path = config_path;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    async fn run(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("--query")
            .arg(query)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(config_path) = &self.config_path {
            command.arg("--config").arg(config_path);
        }

        let child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => SearchError::ScriptNotFound {
                path: self.program.display().to_string(),
                detail: e.to_string(),
            },
            _ => SearchError::Subprocess(e.to_string()),
        })?;

        debug!(program = %self.program.display(), pid = ?child.id(), "Spawned helper");

        // Dropping the wait future on timeout drops the child, which kills it
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(SearchError::Subprocess(e.to_string())),
            Err(_) => {
                return Err(SearchError::Timeout(format!(
                    "Helper {} did not finish within {}s",
                    self.program.display(),
                    self.timeout.as_secs_f64()
                )))
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let returncode = output.status.code();

        classify_output(stdout, stderr, returncode)
    }
}

/// Turn captured helper output into an outcome
pub fn classify_output(
    stdout: String,
    stderr: String,
    returncode: Option<i32>,
) -> Result<SearchOutcome, SearchError> {
    if stdout.is_empty() {
        return Err(SearchError::EmptyOutput { returncode, stderr });
    }

    let parsed = match serde_json::from_str::<Value>(&stdout) {
        Ok(Value::Object(fields)) => Ok(SearchOutcome::from_helper(fields)),
        Ok(_) => Err("helper output is not a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    };

    parsed.map_err(|detail| SearchError::NonJsonOutput {
        detail,
        stdout,
        stderr,
        returncode,
    })
}

#[async_trait]
impl SearchBackend for SubprocessSearch {
    fn name(&self) -> &str {
        "subprocess"
    }

    async fn search(&self, query: &str) -> SearchOutcome {
        info!(program = %self.program.display(), "Delegating search to helper");

        match self.run(query).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = e.kind(), detail = %e, "Helper run failed");
                SearchOutcome::failure(e)
            }
        }
    }
}
