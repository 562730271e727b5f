//! In-memory credential store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{AccessToken, Identity, NewIdentity, UserId, UserName};

use super::lock;

#[derive(Default)]
struct UserTable {
    by_id: HashMap<UserId, Identity>,
    id_by_name: HashMap<UserName, UserId>,
    id_by_token: HashMap<AccessToken, UserId>,
}

/// Credential store kept in process memory.
///
/// Name and token uniqueness are checked and claimed under one lock, the
/// in-memory counterpart of a `UNIQUE` constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, identity: &NewIdentity) -> Result<Identity, UserPersistenceError> {
        let mut table = lock(&self.table);
        if table.id_by_name.contains_key(&identity.name) {
            return Err(UserPersistenceError::duplicate_name("name already registered"));
        }
        if table.id_by_token.contains_key(&identity.token) || table.by_id.contains_key(&identity.id)
        {
            return Err(UserPersistenceError::duplicate_name("identity already registered"));
        }
        let stored = Identity::from(identity.clone());
        table.id_by_name.insert(identity.name.clone(), identity.id);
        table.id_by_token.insert(identity.token.clone(), identity.id);
        table.by_id.insert(identity.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_name(&self, name: &UserName) -> Result<Option<Identity>, UserPersistenceError> {
        let table = lock(&self.table);
        Ok(table
            .id_by_name
            .get(name)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Identity>, UserPersistenceError> {
        let table = lock(&self.table);
        Ok(table
            .id_by_token
            .get(token)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Uniqueness and lookup behaviour.
    use std::sync::Arc;

    use super::*;
    use crate::domain::{ACCESS_TOKEN_BYTES, PasswordDigest};
    use rstest::rstest;

    fn new_identity(name: &str, seed: u8) -> NewIdentity {
        NewIdentity {
            id: UserId::random(),
            name: UserName::new(name).expect("valid name"),
            password_digest: PasswordDigest::new("digest").expect("digest"),
            token: AccessToken::from_bytes(&[seed; ACCESS_TOKEN_BYTES]),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_find_created_identities() {
        let repo = InMemoryUserRepository::default();
        let created = repo.create(&new_identity("alice", 1)).await.expect("created");

        let by_name = repo
            .find_by_name(created.name())
            .await
            .expect("lookup")
            .expect("present");
        let by_token = repo
            .find_by_token(created.token())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(by_name, created);
        assert_eq!(by_token, created);
    }

    #[rstest]
    #[tokio::test]
    async fn second_registration_of_a_name_fails() {
        let repo = InMemoryUserRepository::default();
        repo.create(&new_identity("alice", 1)).await.expect("first");
        let err = repo
            .create(&new_identity("  alice ", 2))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserPersistenceError::DuplicateName { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_token_is_absent() {
        let repo = InMemoryUserRepository::default();
        repo.create(&new_identity("alice", 1)).await.expect("created");
        let other = AccessToken::from_bytes(&[2; ACCESS_TOKEN_BYTES]);
        assert!(repo.find_by_token(&other).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_admit_exactly_one() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let attempts: Vec<_> = (0..32_u8)
            .map(|seed| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.create(&new_identity("alice", seed)).await })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for attempt in attempts {
            match attempt.await.expect("task completes") {
                Ok(_) => successes += 1,
                Err(UserPersistenceError::DuplicateName { .. }) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(duplicates, 31);
    }
}
