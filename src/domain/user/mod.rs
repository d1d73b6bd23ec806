//! User domain
//!
//! The user aggregate with its dust balance, the rules it is validated
//! against, and the repository trait used to persist it.

mod entity;
mod repository;
mod validation;

#[cfg(test)]
pub mod fake;

pub use entity::{CreateUserCommand, User, UserProps, UserSnapshot};
pub use repository::UserRepository;
pub use validation::{
    UserRules, UserValidator, MAX_BALANCE, MAX_BALANCE_DECIMAL_PLACES, MAX_DISPLAY_NAME_LENGTH,
    MIN_BALANCE,
};

#[cfg(test)]
pub use repository::MockUserRepository;
