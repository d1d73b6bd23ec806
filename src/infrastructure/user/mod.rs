//! User infrastructure module
//!
//! This module provides the in-memory and PostgreSQL repositories, the
//! add-dust use case, and the user service built on top of them.

mod add_dust;
mod postgres_repository;
mod repository;
mod service;

pub use add_dust::{AddDustUseCase, AddDustUserInput, AddDustUserOutput};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;
