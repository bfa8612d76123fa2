use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiState;
use crate::clients::CreatedClient;
use crate::document::ClientRecord;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(rename = "Email", alias = "email", default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    pub id: Option<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

/// `POST /api/create-user`
///
/// The body is parsed by hand so every malformed payload maps to 400,
/// regardless of content type.
pub async fn create_user(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResult<Json<CreatedClient>> {
    let request: CreateUserRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {e}")))?;

    if request.email.trim().is_empty() {
        return Err(ApiError::BadRequest("Email is required".to_string()));
    }

    let created = state.manager.create_client(&request.email).await?;
    Ok(Json(created))
}

/// `GET /api/users`
pub async fn list_users(State(state): State<ApiState>) -> ApiResult<Json<Vec<ClientRecord>>> {
    let clients = state.manager.list_clients().await?;
    Ok(Json(clients))
}

/// `DELETE /api/delete-user?id=...`
pub async fn delete_user(
    State(state): State<ApiState>,
    Query(query): Query<DeleteUserQuery>,
) -> ApiResult<Json<StatusResponse>> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("User ID is required".to_string()))?;

    state.manager.delete_client(&id).await?;
    Ok(Json(StatusResponse {
        status: "user deleted",
    }))
}
