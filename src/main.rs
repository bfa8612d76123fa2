//! VLESS Manager
//!
//! HTTP management API for the client list of an Xray VLESS inbound.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────┐
//!                   │                  VLESS MANAGER                   │
//!                   │                                                  │
//!   API request     │  ┌────────┐    ┌─────────┐    ┌──────────────┐   │
//!   ────────────────┼─▶│  http  │───▶│   api   │───▶│   clients    │   │
//!                   │  │ server │    │handlers │    │   manager    │   │
//!                   │  └────────┘    └─────────┘    └──────┬───────┘   │
//!                   │                          write lock  │           │
//!                   │                   ┌──────────────────┼─────┐     │
//!                   │                   ▼                  ▼     ▼     │
//!                   │             ┌──────────┐      ┌────────┐ ┌──────┐│
//!                   │             │ document │◀────▶│ editor │ │reload││──▶ systemctl
//!                   │             │  store   │      └────────┘ └──────┘│    reload xray
//!                   │             └────┬─────┘                         │
//!                   └──────────────────┼───────────────────────────────┘
//!                                      ▼
//!                                 config.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use vless_manager::config::load_config;
use vless_manager::lifecycle::{signals, startup};
use vless_manager::observability::{logging, metrics};
use vless_manager::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "vless-manager")]
#[command(about = "HTTP management API for Xray VLESS clients", long_about = None)]
struct Args {
    /// Path to the bootstrap configuration file.
    #[arg(short, long, default_value = "/etc/vless-manager/config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config {}: {}", args.config.display(), e);
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("vless-manager v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        config_path = %config.xray.config_path,
        server = %format!("{}:{}", config.xray.server_ip, config.xray.server_port),
        reload_enabled = config.reload.enabled,
        auth_enabled = config.admin.api_key.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let reloader = startup::reloader_from_config(&config);
    let manager = Arc::new(startup::build_manager(&config, reloader));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let stop = shutdown.wait();
    signals::spawn_signal_handler(shutdown);

    let server = HttpServer::new(config, manager);
    server.run(listener, stop).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
