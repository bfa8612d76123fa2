pub mod auth;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use self::auth::api_auth_middleware;
use self::handlers::*;
use crate::clients::ClientManager;

pub use error::{ApiError, ApiResult};

/// State shared by the management handlers.
#[derive(Clone)]
pub struct ApiState {
    pub manager: Arc<ClientManager>,
    pub api_key: Option<Arc<str>>,
}

impl ApiState {
    pub fn new(manager: Arc<ClientManager>, api_key: Option<String>) -> Self {
        Self {
            manager,
            api_key: api_key.map(Arc::from),
        }
    }
}

pub fn setup_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/create-user", post(create_user))
        .route("/api/users", get(list_users))
        .route("/api/delete-user", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), api_auth_middleware))
        .route("/health", get(health))
        .with_state(state)
}
