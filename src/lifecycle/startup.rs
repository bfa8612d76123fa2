//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the reload trigger the config asks for
//! - Wire the document store, reload trigger and endpoint into a ClientManager
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The config value is handed to components here; nothing reads it globally

use std::sync::Arc;

use crate::clients::{ClientManager, ServerEndpoint};
use crate::config::ManagerConfig;
use crate::document::DocumentStore;
use crate::reload::{CommandReloader, NoopReloader, ReloadTrigger};

/// Reload trigger selected by `[reload]`.
pub fn reloader_from_config(config: &ManagerConfig) -> Arc<dyn ReloadTrigger> {
    if config.reload.enabled {
        let reloader = CommandReloader::from_config(&config.reload);
        tracing::info!(command = %reloader.command_line(), "Reload command configured");
        Arc::new(reloader)
    } else {
        tracing::warn!("Reload disabled; proxy will not see changes until restarted");
        Arc::new(NoopReloader)
    }
}

/// Build the client manager from config with the given reload trigger.
pub fn build_manager(config: &ManagerConfig, reloader: Arc<dyn ReloadTrigger>) -> ClientManager {
    ClientManager::new(
        DocumentStore::new(&config.xray.config_path),
        reloader,
        ServerEndpoint::new(config.xray.server_ip.clone(), config.xray.server_port),
    )
}
