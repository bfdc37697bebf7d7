//! Session token codec
//!
//! Issues and parses self-contained HS384-signed JWTs. The signature is
//! verified before any claim is trusted; expiry is checked against wall-clock
//! time with zero leeway (clock skew between issuer and verifier is an
//! accepted risk). The signing secret is process-wide configuration loaded
//! once at startup — rotating it invalidates every outstanding token.

use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::auth::error::TokenError;
use crate::auth::models::Role;

/// Fixed lifetime of an issued session token: 10 hours.
pub const TOKEN_TTL_SECS: i64 = 10 * 60 * 60;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Granted authorities at issuance time, `ROLE_`-prefixed
    pub authorities: Vec<String>,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiry timestamp (seconds since epoch)
    pub exp: i64,
}

/// Token codec bound to the shared signing secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS384);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `subject` carrying the given roles, valid for the
    /// fixed session TTL.
    pub fn issue(&self, subject: &str, roles: &[Role]) -> anyhow::Result<String> {
        self.issue_with_ttl(subject, roles, Duration::seconds(TOKEN_TTL_SECS))
    }

    /// Issue a token with an explicit lifetime.
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        roles: &[Role],
        ttl: Duration,
    ) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            authorities: roles.iter().map(|r| r.as_authority().to_string()).collect(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS384), &claims, &self.encoding_key)
            .context("failed to encode session token")
    }

    /// Verify and decode a token. Signature first, then expiry; an
    /// unverified payload is never partially trusted.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret")
    }

    /// Flip one character of a token segment while staying inside the
    /// base64url alphabet, so the failure is cryptographic, not syntactic.
    fn flip_char_in_segment(token: &str, segment: usize) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut bytes: Vec<u8> = parts[segment].bytes().collect();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        parts[segment] = String::from_utf8(bytes).unwrap();
        parts.join(".")
    }

    #[test]
    fn roundtrip_preserves_subject_roles_and_ttl() {
        let token = service()
            .issue("alice", &[Role::Student, Role::Officer])
            .unwrap();
        let claims = service().parse(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.authorities, vec!["ROLE_STUDENT", "ROLE_OFFICER"]);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn token_has_three_url_safe_segments() {
        let token = service().issue("alice", &[Role::Student]).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        for part in parts {
            assert!(part.bytes().all(|b| {
                b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
            }));
        }
    }

    #[test]
    fn flipped_signature_byte_is_signature_invalid() {
        let token = service().issue("alice", &[Role::Student]).unwrap();
        let tampered = flip_char_in_segment(&token, 2);
        assert_eq!(service().parse(&tampered), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn tampered_payload_is_signature_invalid() {
        let token = service().issue("alice", &[Role::Student]).unwrap();
        let tampered = flip_char_in_segment(&token, 1);
        assert_eq!(service().parse(&tampered), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn wrong_secret_is_signature_invalid() {
        let token = service().issue("alice", &[Role::Student]).unwrap();
        let other = TokenService::new("another-secret");
        assert_eq!(other.parse(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(service().parse("garbage"), Err(TokenError::Malformed));
        assert_eq!(service().parse(""), Err(TokenError::Malformed));
        assert_eq!(service().parse("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn past_expiry_is_expired() {
        let token = service()
            .issue_with_ttl("alice", &[Role::Student], Duration::seconds(-10))
            .unwrap();
        assert_eq!(service().parse(&token), Err(TokenError::Expired));
    }

    #[test]
    fn token_within_ttl_parses() {
        let token = service()
            .issue_with_ttl("alice", &[Role::Student], Duration::seconds(30))
            .unwrap();
        assert!(service().parse(&token).is_ok());
    }

    #[test]
    fn expired_token_with_bad_signature_reports_the_signature_first() {
        let token = service()
            .issue_with_ttl("alice", &[Role::Student], Duration::seconds(-10))
            .unwrap();
        let tampered = flip_char_in_segment(&token, 2);
        assert_eq!(service().parse(&tampered), Err(TokenError::SignatureInvalid));
    }
}
