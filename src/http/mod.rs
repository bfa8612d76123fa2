//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request ID assigned (x-request-id, UUID v4)
//!     → api handlers (create / list / delete)
//!     → JSON response, request ID echoed back
//! ```

pub mod server;

pub use server::HttpServer;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";
