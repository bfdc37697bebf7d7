//! Token revocation (blacklist) store
//!
//! Tracks tokens that must no longer be trusted before their natural expiry.
//! Entries are keyed by the entire encoded token string and carry an expiry
//! timestamp used only for garbage collection: an entry past its expiry is
//! still reported revoked until the sweeper removes it, so revocation is
//! monotonic between sweeps.
//!
//! The storage backend is abstracted behind [`RevocationBackend`] so a shared
//! database can replace the in-memory map without touching the gate or the
//! session service.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Default garbage-collection lifetime for a revocation entry: 24 hours.
/// Used when the revoked token cannot be parsed for a remaining lifetime.
pub const DEFAULT_REVOCATION_TTL_SECS: i64 = 24 * 60 * 60;

/// Storage capability for revoked tokens.
///
/// `revoke` must be idempotent and `is_revoked` must be cheap — it runs on
/// every authenticated request.
#[async_trait]
pub trait RevocationBackend: Send + Sync {
    /// Record `token` as revoked; its entry becomes sweepable at now + ttl.
    /// Re-revoking an already-revoked token succeeds and keeps it revoked.
    async fn revoke(&self, token: &str, ttl: Duration) -> anyhow::Result<()>;

    /// Whether `token` is currently flagged as revoked.
    async fn is_revoked(&self, token: &str) -> anyhow::Result<bool>;

    /// Delete entries whose expiry is at or before `now`. Returns the number
    /// removed. Missing a run only delays storage reclamation; the tokens
    /// behind expired entries are already unusable.
    async fn sweep(&self, now: DateTime<Utc>) -> anyhow::Result<usize>;
}

/// In-memory revocation store, safe under concurrent request tasks.
#[derive(Default)]
pub struct MemoryRevocationStore {
    /// token string -> entry expiry (seconds since epoch)
    entries: DashMap<String, i64>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationBackend for MemoryRevocationStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> anyhow::Result<()> {
        let expires_at = (Utc::now() + ttl).timestamp();
        // Last writer wins; revocation is monotonic either way.
        self.entries.insert(token.to_string(), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> anyhow::Result<bool> {
        Ok(self.entries.contains_key(token))
    }

    async fn sweep(&self, now: DateTime<Utc>) -> anyhow::Result<usize> {
        let before = self.entries.len();
        let cutoff = now.timestamp();
        self.entries.retain(|_, expires_at| *expires_at > cutoff);
        Ok(before - self.entries.len())
    }
}

/// Start the periodic sweep task. Runs on its own timer task, fully
/// decoupled from request handling, from process init until shutdown.
pub fn spawn_sweeper(
    store: Arc<dyn RevocationBackend>,
    interval: std::time::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The immediate first tick would sweep an empty store.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match store.sweep(Utc::now()).await {
                Ok(removed) => {
                    tracing::info!(removed, "revocation sweep completed");
                }
                Err(e) => tracing::warn!("revocation sweep failed: {e}"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revoke_then_lookup() {
        let store = MemoryRevocationStore::new();
        assert!(!store.is_revoked("tok").await.unwrap());
        store.revoke("tok", Duration::hours(24)).await.unwrap();
        assert!(store.is_revoked("tok").await.unwrap());
    }

    #[tokio::test]
    async fn revoke_is_idempotent() {
        let store = MemoryRevocationStore::new();
        store.revoke("tok", Duration::hours(24)).await.unwrap();
        store.revoke("tok", Duration::hours(24)).await.unwrap();
        assert!(store.is_revoked("tok").await.unwrap());
    }

    #[tokio::test]
    async fn sweep_before_expiry_keeps_the_entry() {
        let store = MemoryRevocationStore::new();
        store.revoke("tok", Duration::hours(24)).await.unwrap();

        let removed = store.sweep(Utc::now() + Duration::hours(1)).await.unwrap();
        assert_eq!(removed, 0);
        assert!(store.is_revoked("tok").await.unwrap());
    }

    #[tokio::test]
    async fn sweep_past_expiry_removes_the_entry() {
        let store = MemoryRevocationStore::new();
        store.revoke("tok", Duration::hours(24)).await.unwrap();

        let removed = store.sweep(Utc::now() + Duration::hours(25)).await.unwrap();
        assert_eq!(removed, 1);
        // A replayed copy of the raw token is no longer found revoked; safety
        // now rests on the token's own expiry having passed.
        assert!(!store.is_revoked("tok").await.unwrap());
    }

    #[tokio::test]
    async fn expired_entry_stays_revoked_until_swept() {
        let store = MemoryRevocationStore::new();
        store.revoke("tok", Duration::seconds(-5)).await.unwrap();
        assert!(store.is_revoked("tok").await.unwrap());

        store.sweep(Utc::now()).await.unwrap();
        assert!(!store.is_revoked("tok").await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_revokes_and_lookups_are_safe() {
        let store = Arc::new(MemoryRevocationStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let token = format!("tok-{}", i % 4);
                store.revoke(&token, Duration::hours(24)).await.unwrap();
                assert!(store.is_revoked(&token).await.unwrap());
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        for i in 0..4 {
            assert!(store.is_revoked(&format!("tok-{i}")).await.unwrap());
        }
    }
}
