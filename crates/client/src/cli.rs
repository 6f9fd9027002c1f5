//! `netbird` subcommand invocations.

use std::process::Stdio;
use std::time::Duration;

use netbird_manager_status::parse_profile_list;
use tokio::process::Command;

use crate::FetchError;

/// Binary looked up on `PATH` when none is configured.
pub const DEFAULT_BINARY: &str = "netbird";

/// Upper bound for a single CLI call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle to the `netbird` command-line client.
#[derive(Debug, Clone)]
pub struct NetbirdCli {
    binary: String,
    timeout: Duration,
}

impl Default for NetbirdCli {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY, DEFAULT_TIMEOUT)
    }
}

impl NetbirdCli {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Raw output of `netbird status --json`.
    pub async fn status_json(&self) -> Result<String, FetchError> {
        self.run(&["status", "--json"]).await
    }

    /// Raw output of `netbird profile list`.
    pub async fn profile_list(&self) -> Result<String, FetchError> {
        self.run(&["profile", "list"]).await
    }

    /// Profile names from `netbird profile list`.
    pub async fn profiles(&self) -> Result<Vec<String>, FetchError> {
        let raw = self.profile_list().await?;
        Ok(parse_profile_list(&raw))
    }

    /// Brings the tunnel up with the given profile.
    pub async fn up(&self, profile: &str) -> Result<(), FetchError> {
        self.run(&["up", "--profile", profile]).await.map(drop)
    }

    /// Brings the tunnel down.
    pub async fn down(&self) -> Result<(), FetchError> {
        self.run(&["down"]).await.map(drop)
    }

    /// Runs the binary with `args` and returns its stdout.
    ///
    /// The child is killed if it outlives the timeout.
    async fn run(&self, args: &[&str]) -> Result<String, FetchError> {
        tracing::debug!(binary = %self.binary, ?args, "running netbird");

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, output)
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
            .map_err(|source| FetchError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::debug!(code = ?output.status.code(), %stderr, "netbird exited with failure");
            return Err(FetchError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cli() {
        let cli = NetbirdCli::default();
        assert_eq!(cli.binary(), "netbird");
        assert_eq!(cli.timeout(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let cli = NetbirdCli::new("/nonexistent/netbird", DEFAULT_TIMEOUT);
        let err = cli.status_json().await.unwrap_err();
        assert!(matches!(err, FetchError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/netbird"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_failed() {
        let cli = NetbirdCli::new("false", DEFAULT_TIMEOUT);
        let err = cli.down().await.unwrap_err();
        assert!(matches!(err, FetchError::Failed { code: Some(1), .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_is_returned() {
        let cli = NetbirdCli::new("echo", DEFAULT_TIMEOUT);
        let out = cli.status_json().await.unwrap();
        assert_eq!(out.trim(), "status --json");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn profiles_skip_header_line() {
        // `echo profile list` prints a single header-like line.
        let cli = NetbirdCli::new("echo", DEFAULT_TIMEOUT);
        assert!(cli.profiles().await.unwrap().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_command_times_out() {
        let cli = NetbirdCli::new("sleep", Duration::from_millis(100));
        let err = cli.run(&["5"]).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }
}
