//! VLESS client manager library.
//!
//! Maintains the client list of an Xray VLESS inbound through an HTTP API and
//! asks the running proxy to reload after every change.

pub mod api;
pub mod clients;
pub mod config;
pub mod document;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reload;

pub use clients::ClientManager;
pub use config::ManagerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
