//! Xray configuration document subsystem.
//!
//! # Data Flow
//! ```text
//! config.json on disk
//!     → store.rs (read, parse)
//!     → schema.rs (XrayDocument: typed path to the clients, raw everything else)
//!     → [clients::editor mutates in memory]
//!     → store.rs (encode, write temp file, rename)
//! ```
//!
//! # Design Decisions
//! - Loaded fresh for every request; nothing is cached
//! - Unknown keys ride along in flattened `extra` maps
//! - Wrong-shaped values are preserved, never rejected at parse time

pub mod schema;
pub mod store;

pub use schema::{ClientRecord, Inbound, InboundSettings, Slot, XrayDocument, VISION_FLOW};
pub use store::{DocumentError, DocumentStore};
