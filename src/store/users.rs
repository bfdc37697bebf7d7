//! User directory
//!
//! Authoritative source of identities and their *current* role sets. The
//! authentication gate consults this on every request instead of trusting
//! the roles embedded in a token, so a role change or account removal takes
//! effect immediately, not at next token issuance.

use dashmap::DashMap;
use uuid::Uuid;

use crate::auth::models::Role;

/// One account row
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    /// PHC-formatted Argon2id digest
    pub password_hash: String,
    pub roles: Vec<Role>,
}

#[derive(Default)]
pub struct UserDirectory {
    users: DashMap<String, UserRecord>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account. Registration proper lives outside this
    /// subsystem; this is the seam it calls into.
    pub fn upsert(&self, username: &str, password_hash: String, roles: Vec<Role>) -> Uuid {
        let id = self
            .users
            .get(username)
            .map(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);
        self.users.insert(
            username.to_string(),
            UserRecord {
                id,
                username: username.to_string(),
                password_hash,
                roles,
            },
        );
        id
    }

    pub fn find(&self, username: &str) -> Option<UserRecord> {
        self.users.get(username).map(|r| r.value().clone())
    }

    /// Live role set for a subject, if the account still exists.
    pub fn roles_of(&self, username: &str) -> Option<Vec<Role>> {
        self.users.get(username).map(|r| r.roles.clone())
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_the_id_stable() {
        let dir = UserDirectory::new();
        let id = dir.upsert("alice", "digest-a".to_string(), vec![Role::Student]);
        let same = dir.upsert("alice", "digest-b".to_string(), vec![Role::Officer]);
        assert_eq!(id, same);

        let record = dir.find("alice").unwrap();
        assert_eq!(record.password_hash, "digest-b");
        assert_eq!(record.roles, vec![Role::Officer]);
    }

    #[test]
    fn roles_of_reflects_the_latest_upsert() {
        let dir = UserDirectory::new();
        dir.upsert("alice", "digest".to_string(), vec![Role::Student]);
        assert_eq!(dir.roles_of("alice"), Some(vec![Role::Student]));

        dir.upsert("alice", "digest".to_string(), vec![Role::Student, Role::Officer]);
        assert_eq!(
            dir.roles_of("alice"),
            Some(vec![Role::Student, Role::Officer])
        );
        assert_eq!(dir.roles_of("nobody"), None);
    }
}
