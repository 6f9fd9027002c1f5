//! Error types for `netbird` invocations.

use std::time::Duration;

/// Errors produced while running the `netbird` binary.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit. Displays the tool's own error text.
    #[error("{}", failure_text(.code, .stderr))]
    Failed { code: Option<i32>, stderr: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

fn failure_text(code: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by signal".to_string(),
    }
}
