//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::identifier::Identifier;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for user persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &Identifier) -> Result<Option<User>, DomainError>;

    /// Store a new user, failing if the ID is taken
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    /// Replace the stored state of an existing user
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a user, returning whether it existed
    async fn delete(&self, id: &Identifier) -> Result<bool, DomainError>;

    /// List all users
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<usize, DomainError>;
}
