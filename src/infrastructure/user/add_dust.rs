//! Add-dust use case

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use validator::{Validate, ValidationError};

use crate::domain::identifier::is_uuid;
use crate::domain::user::{User, UserRepository, UserSnapshot, UserValidator};
use crate::domain::{DomainError, Identifier, UseCase};

/// Output of the add-dust use case
pub type AddDustUserOutput = UserSnapshot;

/// Raw input; both fields are optional so shape errors are reported, not
/// rejected by deserialization
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddDustUserInput {
    #[validate(
        required(message = "id should not be empty"),
        custom(function = "validate_id_shape")
    )]
    pub id: Option<String>,

    #[validate(
        required(message = "dust should not be empty"),
        custom(function = "validate_dust_shape")
    )]
    pub dust: Option<f64>,
}

impl AddDustUserInput {
    pub fn new(id: impl Into<String>, dust: f64) -> Self {
        Self {
            id: Some(id.into()),
            dust: Some(dust),
        }
    }

    /// Check the shape and hand back the typed values
    fn into_checked(self) -> Result<(Identifier, f64), DomainError> {
        self.validate()
            .map_err(|errors| DomainError::input_validation(errors.into()))?;

        match (self.id, self.dust) {
            (Some(id), Some(dust)) => Ok((Identifier::parse(id)?, dust)),
            _ => Err(DomainError::internal("validated input is missing a field")),
        }
    }
}

fn validate_id_shape(id: &str) -> Result<(), ValidationError> {
    if is_uuid(id) {
        Ok(())
    } else {
        Err(ValidationError::new("uuid").with_message("id must be a UUID".into()))
    }
}

fn validate_dust_shape(dust: f64) -> Result<(), ValidationError> {
    if dust.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("number").with_message("dust must be a number".into()))
    }
}

/// Adds dust to a stored user's balance
pub struct AddDustUseCase<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    validator: UserValidator,
}

impl<R: UserRepository + ?Sized> AddDustUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_validator(repository, UserValidator::new())
    }

    pub fn with_validator(repository: Arc<R>, validator: UserValidator) -> Self {
        Self {
            repository,
            validator,
        }
    }
}

impl<R: UserRepository + ?Sized> std::fmt::Debug for AddDustUseCase<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddDustUseCase")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<R: UserRepository + ?Sized> UseCase for AddDustUseCase<R> {
    type Input = AddDustUserInput;
    type Output = AddDustUserOutput;

    async fn execute(&self, input: AddDustUserInput) -> Result<AddDustUserOutput, DomainError> {
        let (id, dust) = input.into_checked()?;
        debug!(id = %id, dust, "Adding dust to user");

        let mut user = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(id.as_str(), User::ENTITY_NAME))?;

        user.add_dust(dust)?;

        // add_dust already validates; this guards against mutators that stop doing so
        user.validate_with(&self.validator)?;

        self.repository.update(&user).await?;
        info!(id = %id, dust, balance = user.balance(), "Dust added to user");

        Ok(user.to_representation())
    }
}
