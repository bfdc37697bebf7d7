//! Password hashing and verification using Argon2id
//!
//! Used only at account seeding and login. Hashing embeds a random salt, so
//! the same plaintext never produces the same digest twice.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password into a PHC-formatted digest string.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(digest.to_string())
}

/// Verify a plaintext password against a stored digest.
///
/// A malformed digest is treated as a mismatch rather than an error so the
/// login path never distinguishes "bad password" from "bad stored hash".
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
