use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::AuthError;
use thiserror::Error;
use tracing::error;

/// Code reported for request bodies that fail to parse.
pub const MALFORMED_BODY_CODE: u16 = 1001;

/// HTTP face of `AuthError` and of body extraction failures. Infrastructure
/// details are logged and replaced by a generic message.
#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    Body(JsonRejection),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self { Self::Auth(e) }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self { Self::Body(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg, code) = match &self {
            ApiError::Auth(e @ AuthError::UsernameTaken) => (StatusCode::CONFLICT, e.to_string(), e.code()),
            ApiError::Auth(e @ AuthError::InvalidCredentials) => (StatusCode::UNAUTHORIZED, e.to_string(), e.code()),
            ApiError::Auth(e @ (AuthError::Repository(_) | AuthError::Token(_))) => {
                error!(error = %e, code = e.code(), "auth infrastructure failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string(), e.code())
            }
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text(), MALFORMED_BODY_CODE),
        };
        (status, Json(serde_json::json!({"error": msg, "code": code}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
