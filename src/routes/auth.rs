//! Auth routes: login, logout, and current-identity lookup

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::error::AuthError;
use crate::auth::middleware::bearer_token;
use crate::auth::models::{CurrentUser, Role};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub roles: Vec<Role>,
    pub expires_at: i64,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let outcome = state.sessions.login(&payload.username, &payload.password)?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        token_type: "Bearer".to_string(),
        roles: outcome.roles,
        expires_at: outcome.expires_at,
    }))
}

/// Best-effort logout: whatever token the header carries gets blacklisted,
/// valid or not, and the response always succeeds. The Authorization
/// response header is cleared so clients drop the credential.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.logout(&token).await;
    }

    (StatusCode::NO_CONTENT, [(header::AUTHORIZATION, "")])
}

/// Current identity as resolved by the gate
pub async fn me(user: CurrentUser) -> Json<serde_json::Value> {
    Json(json!({
        "username": user.username,
        "roles": user.roles,
    }))
}
