//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::roles::InvalidUserRole;

/// Authentication and authorization error
///
/// Only `Unauthorized` and `Forbidden` describe the caller. The other
/// variants are integration problems and are reported as server errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No valid access token
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated, but not allowed
    #[error("Forbidden")]
    Forbidden,

    #[error("Auth is not configured: an auth URL and public key are required")]
    NotConfigured,

    #[error(transparent)]
    InvalidRole(#[from] InvalidUserRole),
}

impl AuthError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::NotConfigured | AuthError::InvalidRole(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::NotConfigured => "AUTH_NOT_CONFIGURED",
            AuthError::InvalidRole(_) => "INVALID_ROLE",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AuthError::Unauthorized => "Invalid or missing access token",
            AuthError::Forbidden => "Insufficient permissions",
            AuthError::NotConfigured | AuthError::InvalidRole(_) => {
                tracing::error!(error = %self, "Authentication misconfigured");
                "Authentication failed"
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
