//! Reload by running an external command.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::ReloadConfig;
use crate::observability::metrics;
use crate::reload::{ReloadError, ReloadTrigger};

/// Runs a fixed command line and waits for it, bounded by a timeout.
#[derive(Debug, Clone)]
pub struct CommandReloader {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandReloader {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &ReloadConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// The command line as it would be typed in a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl ReloadTrigger for CommandReloader {
    async fn reload(&self) -> Result<(), ReloadError> {
        let start = Instant::now();
        let command_line = self.command_line();

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ReloadError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        // Dropping the future on timeout drops the child, which kills it.
        let result = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Err(_) => Err(ReloadError::Timeout {
                command: command_line,
                timeout: self.timeout,
            }),
            Ok(Err(source)) => Err(ReloadError::Spawn {
                command: command_line,
                source,
            }),
            Ok(Ok(output)) if output.status.success() => Ok(()),
            Ok(Ok(output)) => Err(ReloadError::Failed {
                command: command_line,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        };

        metrics::record_reload(result.is_ok(), start);
        match &result {
            Ok(()) => tracing::info!(elapsed = ?start.elapsed(), "Proxy reloaded"),
            Err(e) => tracing::error!(error = %e, elapsed = ?start.elapsed(), "Proxy reload failed"),
        }
        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn reloader(program: &str, args: &[&str], timeout_ms: u64) -> CommandReloader {
        CommandReloader::new(
            program,
            args.iter().map(|a| a.to_string()).collect(),
            Duration::from_millis(timeout_ms),
        )
    }

    #[test]
    fn test_command_line() {
        let r = CommandReloader::from_config(&ReloadConfig::default());
        assert_eq!(r.command_line(), "sudo systemctl reload xray");
    }

    #[tokio::test]
    async fn test_successful_command() {
        assert!(reloader("true", &[], 5_000).reload().await.is_ok());
    }

    #[tokio::test]
    async fn test_nonzero_exit_captures_stderr() {
        let err = reloader("sh", &["-c", "echo boom >&2; exit 3"], 5_000)
            .reload()
            .await
            .unwrap_err();

        match err {
            ReloadError::Failed { stderr, status, .. } => {
                assert_eq!(stderr, "boom");
                assert!(status.contains('3'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let err = reloader("/nonexistent/reload-xray", &[], 5_000)
            .reload()
            .await
            .unwrap_err();
        assert!(matches!(err, ReloadError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_hung_command_times_out() {
        let start = Instant::now();
        let err = reloader("sleep", &["10"], 200).reload().await.unwrap_err();

        assert!(matches!(err, ReloadError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
