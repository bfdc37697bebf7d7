//! Authorization policy
//!
//! Route-level role requirements, applied as router layers after the
//! authentication gate has (or has not) bound an identity. The route →
//! requirement table is the router construction in `server.rs`; a route
//! without a layer here is public by construction, so every protected route
//! must be enumerated there or it is silently open.
//!
//! Responses distinguish missing identity (401) from insufficient role
//! (403). Handlers may layer stricter method-level assertions on top via
//! [`CurrentUser::require`].

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::error::AuthError;
use crate::auth::models::{CurrentUser, Role};

/// Roles allowed to manage job postings
pub const STAFF: &[Role] = &[Role::Officer, Role::Admin];

/// What a route demands of the request's identity context
#[derive(Debug, Clone, Copy)]
pub enum RoleRequirement {
    /// No identity needed
    Public,
    /// Any authenticated identity
    Authenticated,
    /// One specific role
    Role(Role),
    /// Any role out of a fixed set
    AnyOf(&'static [Role]),
}

impl RoleRequirement {
    pub fn allows(&self, user: &CurrentUser) -> bool {
        match self {
            RoleRequirement::Public | RoleRequirement::Authenticated => true,
            RoleRequirement::Role(role) => user.roles.contains(role),
            RoleRequirement::AnyOf(roles) => roles.iter().any(|r| user.roles.contains(r)),
        }
    }
}

async fn enforce(requirement: RoleRequirement, req: Request, next: Next) -> Response {
    match req.extensions().get::<CurrentUser>() {
        None => AuthError::Unauthenticated.into_response(),
        Some(user) if requirement.allows(user) => next.run(req).await,
        Some(user) => {
            tracing::debug!(username = %user.username, ?requirement, "insufficient role");
            AuthError::InsufficientRole.into_response()
        }
    }
}

pub async fn require_authenticated(req: Request, next: Next) -> Response {
    enforce(RoleRequirement::Authenticated, req, next).await
}

pub async fn require_student(req: Request, next: Next) -> Response {
    enforce(RoleRequirement::Role(Role::Student), req, next).await
}

pub async fn require_staff(req: Request, next: Next) -> Response {
    enforce(RoleRequirement::AnyOf(STAFF), req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[Role]) -> CurrentUser {
        CurrentUser {
            username: "test".to_string(),
            roles: roles.to_vec(),
        }
    }

    #[test]
    fn public_and_authenticated_allow_any_identity() {
        let student = user(&[Role::Student]);
        assert!(RoleRequirement::Public.allows(&student));
        assert!(RoleRequirement::Authenticated.allows(&student));
    }

    #[test]
    fn specific_role_requires_exactly_that_role() {
        let requirement = RoleRequirement::Role(Role::Admin);
        assert!(requirement.allows(&user(&[Role::Admin])));
        assert!(!requirement.allows(&user(&[Role::Student, Role::Officer])));
    }

    #[test]
    fn any_of_accepts_each_member() {
        let requirement = RoleRequirement::AnyOf(STAFF);
        assert!(requirement.allows(&user(&[Role::Officer])));
        assert!(requirement.allows(&user(&[Role::Admin])));
        assert!(!requirement.allows(&user(&[Role::Student])));
    }
}
