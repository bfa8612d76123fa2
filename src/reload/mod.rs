//! Proxy reload subsystem.
//!
//! # Data Flow
//! ```text
//! document saved
//!     → ReloadTrigger::reload()
//!     → command.rs (spawn `sudo systemctl reload xray`, bounded wait)
//!     → running proxy re-reads config.json
//! ```
//!
//! # Design Decisions
//! - Reload is a capability injected into the manager, never a global
//! - A failed reload is reported, not rolled back; the file stays updated
//! - Every wait is bounded; a hung command is killed and reported

pub mod command;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use command::CommandReloader;

/// Errors raised while asking the proxy to reload.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("failed to start reload command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("reload command '{command}' exited with {status}{}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("reload command '{command}' timed out after {}s", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Tells the running proxy to re-read its configuration.
#[async_trait]
pub trait ReloadTrigger: Send + Sync {
    async fn reload(&self) -> Result<(), ReloadError>;
}

/// Reload trigger for deployments where reloading is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReloader;

#[async_trait]
impl ReloadTrigger for NoopReloader {
    async fn reload(&self) -> Result<(), ReloadError> {
        tracing::debug!("Reload disabled, skipping");
        Ok(())
    }
}
