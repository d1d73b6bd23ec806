//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, Identifier};

/// In-memory implementation of UserRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Identifier, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let users_map = users
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users_map)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &Identifier) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.id()) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }

        users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(user.id().as_str(), User::ENTITY_NAME)),
        }
    }

    async fn delete(&self, id: &Identifier) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(id).is_some())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by_key(|u| u.created_at());

        Ok(result)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.users.read().await.len())
    }
}
