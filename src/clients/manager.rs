//! Client operations: load, edit, save and reload under one lock.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use uuid::Uuid;

use crate::clients::editor::{self, StructureError};
use crate::clients::link::ServerEndpoint;
use crate::document::{ClientRecord, DocumentError, DocumentStore};
use crate::observability::metrics;
use crate::reload::{ReloadError, ReloadTrigger};

/// Failures of a client operation.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    /// The document on disk was updated but the proxy did not pick it up.
    #[error("config saved but proxy reload failed: {source}")]
    Reload {
        #[source]
        source: ReloadError,
        /// Id of the client that was created, when the operation was a create.
        user_id: Option<String>,
    },

    /// The task running the operation panicked or was aborted.
    #[error("client operation did not complete: {0}")]
    Interrupted(#[from] JoinError),
}

/// Result of a successful create.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedClient {
    pub vless_link: String,
    pub user_id: String,
}

/// Owns the document store and the reload trigger.
///
/// Every mutation runs load → edit → save → reload while holding `write_lock`,
/// so concurrent requests cannot overwrite each other's changes. Mutations run
/// on their own task: dropping the caller's future (request timeout, client
/// disconnect) does not stop a sequence that has already started.
pub struct ClientManager {
    inner: Arc<Inner>,
}

struct Inner {
    store: DocumentStore,
    reloader: Arc<dyn ReloadTrigger>,
    endpoint: ServerEndpoint,
    write_lock: Mutex<()>,
}

impl ClientManager {
    pub fn new(store: DocumentStore, reloader: Arc<dyn ReloadTrigger>, endpoint: ServerEndpoint) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                reloader,
                endpoint,
                write_lock: Mutex::new(()),
            }),
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    /// Create a client with a fresh UUID and return its share link.
    pub async fn create_client(&self, email: &str) -> Result<CreatedClient, ManagerError> {
        let inner = Arc::clone(&self.inner);
        let email = email.to_owned();
        tokio::spawn(async move { inner.create_client(&email).await }).await?
    }

    /// All clients currently on disk.
    ///
    /// Reads without the lock; saves are atomic renames.
    pub async fn list_clients(&self) -> Result<Vec<ClientRecord>, ManagerError> {
        let document = self.inner.store.load().await?;
        Ok(editor::list_clients(&document))
    }

    /// Remove every client with `user_id`. Unknown ids succeed.
    pub async fn delete_client(&self, user_id: &str) -> Result<(), ManagerError> {
        let inner = Arc::clone(&self.inner);
        let user_id = user_id.to_owned();
        tokio::spawn(async move { inner.delete_client(&user_id).await }).await?
    }
}

impl Inner {
    async fn create_client(&self, email: &str) -> Result<CreatedClient, ManagerError> {
        let user_id = Uuid::new_v4().to_string();

        let _guard = self.write_lock.lock().await;

        let mut document = self.store.load().await?;
        editor::add_client(&mut document, &user_id, email)?;
        self.store.save(&document).await?;

        metrics::record_client_created();
        tracing::info!(user_id = %user_id, email = %email, "Client added");

        self.reloader
            .reload()
            .await
            .map_err(|source| ManagerError::Reload {
                source,
                user_id: Some(user_id.clone()),
            })?;

        Ok(CreatedClient {
            vless_link: self.endpoint.vless_link(&user_id, email),
            user_id,
        })
    }

    async fn delete_client(&self, user_id: &str) -> Result<(), ManagerError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.store.load().await?;
        let removed = editor::remove_client(&mut document, user_id);
        self.store.save(&document).await?;

        metrics::record_clients_deleted(removed);
        if removed == 0 {
            tracing::info!(user_id = %user_id, "No client with that id, nothing removed");
        } else {
            tracing::info!(user_id = %user_id, removed, "Client removed");
        }

        self.reloader
            .reload()
            .await
            .map_err(|source| ManagerError::Reload { source, user_id: None })
    }
}
