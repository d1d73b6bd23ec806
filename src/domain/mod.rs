//! Domain layer - Core business logic and entities

pub mod error;
pub mod identifier;
pub mod traits;
pub mod user;
pub mod validation;

pub use error::{DomainError, ValidationKind};
pub use identifier::{Identifier, InvalidIdentifierError};
pub use traits::UseCase;
pub use user::{CreateUserCommand, User, UserRepository, UserSnapshot, UserValidator};
pub use validation::{FieldError, ValidationErrors, ValidationObserver};
