//! User service for account management and dust operations

use std::sync::Arc;

use tracing::{debug, info};

use super::add_dust::{AddDustUseCase, AddDustUserInput, AddDustUserOutput};
use crate::domain::user::{CreateUserCommand, User, UserRepository};
use crate::domain::{DomainError, Identifier, UseCase};

/// User service for management and balance changes
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    add_dust: AddDustUseCase<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        let add_dust = AddDustUseCase::new(repository.clone());
        Self {
            repository,
            add_dust,
        }
    }

    /// Create and store a new user
    pub async fn create(&self, command: CreateUserCommand) -> Result<User, DomainError> {
        let user = User::create(command)?;
        self.repository.insert(&user).await?;

        info!(id = %user.id(), "User created");
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id = Identifier::parse(id)?;
        self.repository.find_by_id(&user_id).await
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.find_all().await
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Rename a user
    pub async fn change_display_name(
        &self,
        id: &str,
        display_name: impl Into<String>,
    ) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.change_display_name(display_name)?;

        self.repository.update(&user).await?;
        Ok(user)
    }

    /// Add dust through the add-dust use case
    pub async fn add_dust(&self, input: AddDustUserInput) -> Result<AddDustUserOutput, DomainError> {
        self.add_dust.execute(input).await
    }

    /// Remove dust from a user's balance
    pub async fn subtract_dust(&self, id: &str, amount: f64) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.subtract_dust(amount)?;

        self.repository.update(&user).await?;
        info!(id = %user.id(), amount, balance = user.balance(), "Dust subtracted from user");
        Ok(user)
    }

    /// Activate a user
    pub async fn activate(&self, id: &str) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.activate();

        self.repository.update(&user).await?;
        Ok(user)
    }

    /// Deactivate a user
    pub async fn deactivate(&self, id: &str) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.deactivate();

        self.repository.update(&user).await?;
        Ok(user)
    }

    /// Delete a user
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let user_id = Identifier::parse(id)?;
        self.repository.delete(&user_id).await
    }

    async fn load(&self, id: &str) -> Result<User, DomainError> {
        debug!(id, "Loading user");

        let user_id = Identifier::parse(id)?;
        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(id, User::ENTITY_NAME))
    }
}

impl<R: UserRepository + ?Sized> std::fmt::Debug for UserService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("add_dust", &self.add_dust)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository> {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    async fn create_user(service: &UserService<InMemoryUserRepository>, balance: f64) -> User {
        service
            .create(CreateUserCommand::new("John Doe").with_balance(balance))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = create_service();
        let user = create_user(&service, 0.0).await;

        let fetched = service.get(user.id().as_str()).await.unwrap();
        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn test_create_invalid_user_is_not_stored() {
        let service = create_service();

        let result = service.create(CreateUserCommand::new("")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_with_malformed_id() {
        let service = create_service();

        let result = service.get("user-1").await;
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_change_display_name() {
        let service = create_service();
        let user = create_user(&service, 0.0).await;

        let renamed = service
            .change_display_name(user.id().as_str(), "Jane Doe")
            .await
            .unwrap();
        assert_eq!(renamed.display_name(), "Jane Doe");

        let result = service.change_display_name(user.id().as_str(), "").await;
        assert!(result.is_err());

        let stored = service.get(user.id().as_str()).await.unwrap().unwrap();
        assert_eq!(stored.display_name(), "Jane Doe");
    }

    #[tokio::test]
    async fn test_add_and_subtract_dust() {
        let service = create_service();
        let user = create_user(&service, 0.0).await;
        let id = user.id().as_str();

        let output = service
            .add_dust(AddDustUserInput::new(id, 50.0))
            .await
            .unwrap();
        assert_eq!(output.balance, 50.0);

        let updated = service.subtract_dust(id, 20.0).await.unwrap();
        assert_eq!(updated.balance(), 30.0);
    }

    #[tokio::test]
    async fn test_subtract_below_zero_leaves_stored_balance() {
        let service = create_service();
        let user = create_user(&service, 50.0).await;
        let id = user.id().as_str();

        let result = service.subtract_dust(id, 100.0).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let stored = service.get(id).await.unwrap().unwrap();
        assert_eq!(stored.balance(), 50.0);
    }

    #[tokio::test]
    async fn test_activate_and_deactivate() {
        let service = create_service();
        let user = create_user(&service, 0.0).await;
        let id = user.id().as_str();

        let deactivated = service.deactivate(id).await.unwrap();
        assert!(!deactivated.is_active());

        let activated = service.activate(id).await.unwrap();
        assert!(activated.is_active());
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let service = create_service();
        let id = Identifier::generate();

        let result = service.activate(id.as_str()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let service = create_service();
        let first = create_user(&service, 0.0).await;
        create_user(&service, 1.0).await;

        assert_eq!(service.list().await.unwrap().len(), 2);

        assert!(service.delete(first.id().as_str()).await.unwrap());
        assert_eq!(service.count().await.unwrap(), 1);
    }
}
