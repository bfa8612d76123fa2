use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::api::error::ApiError;
use crate::api::ApiState;

/// Require `Authorization: Bearer <api_key>` when an API key is configured.
pub async fn api_auth_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(api_key) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if token.is_some_and(|token| token_matches(token, api_key)) {
        return next.run(request).await;
    }

    tracing::warn!(path = %request.uri().path(), "Rejected request without valid bearer token");
    ApiError::Unauthorized.into_response()
}

fn token_matches(token: &str, api_key: &str) -> bool {
    token.as_bytes().ct_eq(api_key.as_bytes()).into()
}
