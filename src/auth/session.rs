//! Session service
//!
//! Façade orchestrating login (password verification → token issuance over
//! the identity's current roles) and logout (unconditional best-effort
//! revocation).

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::auth::error::AuthError;
use crate::auth::jwt::TokenService;
use crate::auth::models::Role;
use crate::auth::password;
use crate::auth::revocation::{DEFAULT_REVOCATION_TTL_SECS, RevocationBackend};
use crate::store::users::UserDirectory;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub roles: Vec<Role>,
    pub expires_at: i64,
}

pub struct SessionService {
    users: Arc<UserDirectory>,
    tokens: Arc<TokenService>,
    revocations: Arc<dyn RevocationBackend>,
}

impl SessionService {
    pub fn new(
        users: Arc<UserDirectory>,
        tokens: Arc<TokenService>,
        revocations: Arc<dyn RevocationBackend>,
    ) -> Self {
        Self {
            users,
            tokens,
            revocations,
        }
    }

    /// Verify credentials and issue a session token over the identity's
    /// current role set. Unknown user and wrong password produce the same
    /// `InvalidCredentials` signal.
    pub fn login(&self, username: &str, plaintext: &str) -> Result<LoginOutcome, AuthError> {
        let record = self
            .users
            .find(username)
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(plaintext, &record.password_hash) {
            tracing::debug!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&record.username, &record.roles)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let claims = self
            .tokens
            .parse(&token)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(username, "login succeeded");
        Ok(LoginOutcome {
            token,
            roles: record.roles,
            expires_at: claims.exp,
        })
    }

    /// Revoke a presented token regardless of its structural validity. The
    /// caller's intent — stop trusting this token — is unconditional, so a
    /// malformed or already-expired token is blacklisted too, under the
    /// default entry lifetime. Store failures are logged and swallowed;
    /// logout never fails the response.
    pub async fn logout(&self, token: &str) {
        let ttl = match self.tokens.parse(token) {
            Ok(claims) => Duration::seconds(
                (claims.exp - Utc::now().timestamp()).max(1),
            ),
            Err(_) => Duration::seconds(DEFAULT_REVOCATION_TTL_SECS),
        };

        if let Err(e) = self.revocations.revoke(token, ttl).await {
            tracing::warn!("failed to record revoked token: {e}");
        } else {
            tracing::info!("session token revoked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::revocation::MemoryRevocationStore;

    fn service() -> SessionService {
        let users = Arc::new(UserDirectory::new());
        users.upsert(
            "alice",
            password::hash_password("correct horse").unwrap(),
            vec![Role::Student],
        );
        SessionService::new(
            users,
            Arc::new(TokenService::new("test-secret")),
            Arc::new(MemoryRevocationStore::new()),
        )
    }

    #[test]
    fn login_issues_a_parsable_token_with_current_roles() {
        let sessions = service();
        let outcome = sessions.login("alice", "correct horse").unwrap();

        assert_eq!(outcome.roles, vec![Role::Student]);
        let claims = TokenService::new("test-secret").parse(&outcome.token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, outcome.expires_at);
    }

    #[test]
    fn wrong_password_and_unknown_user_are_indistinguishable() {
        let sessions = service();
        let wrong = sessions.login("alice", "wrong").unwrap_err();
        let unknown = sessions.login("nobody", "whatever").unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn logout_revokes_a_valid_token() {
        let sessions = service();
        let outcome = sessions.login("alice", "correct horse").unwrap();

        sessions.logout(&outcome.token).await;
        assert!(sessions.revocations.is_revoked(&outcome.token).await.unwrap());
    }

    #[tokio::test]
    async fn logout_blacklists_even_a_garbage_token() {
        let sessions = service();
        sessions.logout("not-a-token").await;
        assert!(sessions.revocations.is_revoked("not-a-token").await.unwrap());
    }

    #[tokio::test]
    async fn logout_twice_is_harmless() {
        let sessions = service();
        let outcome = sessions.login("alice", "correct horse").unwrap();
        sessions.logout(&outcome.token).await;
        sessions.logout(&outcome.token).await;
        assert!(sessions.revocations.is_revoked(&outcome.token).await.unwrap());
    }
}
