use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::models::User;
use crate::account::ports::UserRepository;

/// Process-local user storage keyed by username.
///
/// Creations take the write lock, so two concurrent registrations of the same
/// username cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.write().await;

        match users.entry(user.username.as_str().to_string()) {
            Entry::Occupied(entry) => Err(AccountError::UsernameAlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(user).clone()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AccountError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::models::Username;

    fn user(username: &str) -> User {
        User::new(
            Username::new(username.to_string()).unwrap(),
            "$argon2id$test_hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("alice")).await.unwrap();

        let found = repository.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_find_unknown() {
        let repository = InMemoryUserRepository::new();
        assert!(repository.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repository = InMemoryUserRepository::new();
        let first = repository.create(user("alice")).await.unwrap();

        let result = repository.create(user("alice")).await;
        assert!(matches!(
            result,
            Err(AccountError::UsernameAlreadyExists(ref name)) if name == "alice"
        ));

        assert_eq!(repository.len().await, 1);
        let stored = repository.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
    }

    #[tokio::test]
    async fn test_concurrent_creations_keep_one_user() {
        let repository = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.create(user("racer")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.len().await, 1);
    }
}
