//! Client management subsystem.
//!
//! # Data Flow
//! ```text
//! API request
//!     → manager.rs (take write lock)
//!     → document::store (load)
//!     → editor.rs (append / filter in memory)
//!     → document::store (save)
//!     → reload::ReloadTrigger
//!     → link.rs (share link for new clients)
//! ```
//!
//! # Design Decisions
//! - One process-wide lock covers load through reload for every mutation
//! - Listing is lock-free and never fails on odd document shapes
//! - Deleting an unknown id is a success, not "not found"

pub mod editor;
pub mod link;
pub mod manager;

pub use editor::{add_client, list_clients, remove_client, StructureError};
pub use link::ServerEndpoint;
pub use manager::{ClientManager, CreatedClient, ManagerError};
