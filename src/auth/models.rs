//! Authentication Models
//!
//! Roles, the per-request identity context, and its axum extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// Portal roles. Serialized in claims as `ROLE_`-prefixed authority strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Officer,
    Student,
}

impl Role {
    /// Authority string embedded in issued tokens
    pub fn as_authority(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::Officer => "ROLE_OFFICER",
            Role::Student => "ROLE_STUDENT",
        }
    }
}

/// Identity context resolved by the authentication gate.
///
/// Bound as a request extension for the lifetime of one request and never
/// shared across requests. Roles come from the live user directory, not the
/// token's embedded claims.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub username: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    /// Method-level assertion: require one specific role.
    ///
    /// May be stricter than the route-level requirement; both must pass.
    pub fn require(&self, role: Role) -> Result<(), AuthError> {
        if self.roles.contains(&role) {
            Ok(())
        } else {
            Err(AuthError::InsufficientRole)
        }
    }

    /// Method-level assertion: require any of the given roles.
    pub fn require_any(&self, roles: &[Role]) -> Result<(), AuthError> {
        if roles.iter().any(|r| self.roles.contains(r)) {
            Ok(())
        } else {
            Err(AuthError::InsufficientRole)
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}
