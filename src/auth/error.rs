//! Error taxonomy for the authentication core.
//!
//! Token-level failures (`TokenError`) are distinguished internally so the
//! gate and tests can tell them apart, but they are never surfaced to
//! clients as anything more specific than "unauthorized".

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failures produced by the token codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is not a structurally valid signed token
    #[error("malformed token")]
    Malformed,
    /// Signature verification failed
    #[error("token signature invalid")]
    SignatureInvalid,
    /// Signature verified but the token is past its expiry
    #[error("token expired")]
    Expired,
}

/// Failures produced anywhere in the authentication pipeline.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthenticated,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token revoked")]
    TokenRevoked,
    #[error("identity not found")]
    IdentityNotFound,
    #[error("insufficient role")]
    InsufficientRole,
    #[error("internal auth failure: {0}")]
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::Token(_)
            | AuthError::TokenRevoked
            | AuthError::IdentityNotFound => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AuthError::Internal(reason) = &self {
            tracing::error!("internal auth failure: {reason}");
        }

        // Generic bodies only: the caller must not be able to distinguish a
        // revoked token from a malformed one.
        let message = match status {
            StatusCode::UNAUTHORIZED => "unauthorized",
            StatusCode::FORBIDDEN => "forbidden",
            _ => "internal error",
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
