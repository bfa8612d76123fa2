//! Configuration schema definitions.
//!
//! This module defines the bootstrap configuration for the manager.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the VLESS manager.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ManagerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Location of the Xray document and the advertised endpoint.
    pub xray: XrayConfig,

    /// How the running proxy is told to re-read its configuration.
    pub reload: ReloadConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Xray document location and the endpoint advertised in client links.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct XrayConfig {
    /// Path to the Xray JSON configuration document.
    pub config_path: String,

    /// Public host or IP placed in generated `vless://` links.
    pub server_ip: String,

    /// Public port placed in generated `vless://` links.
    pub server_port: u16,
}

impl Default for XrayConfig {
    fn default() -> Self {
        Self {
            config_path: "/usr/local/etc/xray/config.json".to_string(),
            server_ip: "127.0.0.1".to_string(),
            server_port: 443,
        }
    }
}

/// Reload command configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Run the reload command after each mutation.
    pub enabled: bool,

    /// Program to execute.
    pub command: String,

    /// Arguments passed to `command`.
    pub args: Vec<String>,

    /// Upper bound on how long the command may run, in seconds.
    pub timeout_secs: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "sudo".to_string(),
            args: vec![
                "systemctl".to_string(),
                "reload".to_string(),
                "xray".to_string(),
            ],
            timeout_secs: 30,
        }
    }
}

/// Timeout configuration for HTTP requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Must exceed `reload.timeout_secs` when reload is enabled.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Management API authentication.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Bearer token required on `/api/*` routes. Auth is off when unset.
    pub api_key: Option<String>,
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}
