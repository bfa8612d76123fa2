//! Error responses for the management API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::clients::ManagerError;
use crate::document::DocumentError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("missing or invalid bearer token")]
    Unauthorized,

    #[error(transparent)]
    Manager(#[from] ManagerError),
}

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized => "unauthorized",
            ApiError::Manager(ManagerError::Document(DocumentError::Parse { .. })) => "parse_error",
            ApiError::Manager(ManagerError::Document(_)) => "io_error",
            ApiError::Manager(ManagerError::Structure(_)) => "structure_error",
            ApiError::Manager(ManagerError::Reload { .. }) => "reload_failed",
            ApiError::Manager(ManagerError::Interrupted(_)) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Manager(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Extra context; for reload failures this tells the caller the change
    /// is already on disk and must not be retried.
    pub fn details(&self) -> Option<Value> {
        match self {
            ApiError::Manager(ManagerError::Reload { user_id, .. }) => {
                let mut details = json!({ "persisted": true });
                if let Some(id) = user_id {
                    details["user_id"] = json!(id);
                }
                Some(details)
            }
            _ => None,
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            code: self.code(),
            details: self.details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        (status, Json(self.to_error_body())).into_response()
    }
}
