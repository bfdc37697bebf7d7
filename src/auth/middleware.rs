//! Authentication gate
//!
//! Per-request middleware that turns a bearer credential into an identity
//! context. Every failure mode — missing header, malformed token, bad
//! signature, expiry, revocation, vanished account — downgrades to "no
//! identity" and the request continues down the chain; rejection is the
//! authorization policy's job, so public routes stay reachable even with a
//! garbage Authorization header.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::error::AuthError;
use crate::auth::models::CurrentUser;
use crate::server::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
/// An empty or whitespace-only remainder counts as no credential at all.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// The gate itself. Binds at most one identity per request (the first
/// resolution wins) and never short-circuits the chain.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.extensions().get::<CurrentUser>().is_none() {
        if let Some(token) = bearer_token(req.headers()) {
            match resolve_identity(&state, &token).await {
                Ok(user) => {
                    tracing::debug!(username = %user.username, "request authenticated");
                    req.extensions_mut().insert(user);
                }
                // Downgrade, never abort: the reason is for the logs only.
                Err(e) => tracing::debug!(error = %e, "bearer token not accepted"),
            }
        }
    }

    next.run(req).await
}

/// Token → identity, or the precise reason it could not be trusted.
async fn resolve_identity(state: &AppState, token: &str) -> Result<CurrentUser, AuthError> {
    let claims = state.tokens.parse(token)?;

    let revoked = state
        .revocations
        .is_revoked(token)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?;
    if revoked {
        return Err(AuthError::TokenRevoked);
    }

    // Re-resolve the live role set rather than trusting embedded claims;
    // roles can change between issuance and use.
    let roles = state
        .users
        .roles_of(&claims.sub)
        .ok_or(AuthError::IdentityNotFound)?;

    Ok(CurrentUser {
        username: claims.sub,
        roles,
    })
}
