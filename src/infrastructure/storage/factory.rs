//! Repository factory for runtime storage selection

use std::sync::Arc;

use tracing::info;

use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::migrations::run_user_migrations;
use super::postgres::{self, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for creating repository instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the user repository selected by the configuration
    ///
    /// PostgreSQL repositories have their schema migrated before use.
    pub async fn create_user_repository(
        config: &StorageConfig,
    ) -> Result<Arc<dyn UserRepository>, DomainError> {
        info!("Storage backend: {:?}", config.storage_type());

        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryUserRepository::new())),
            StorageConfig::Postgres(pg_config) => {
                let pool = postgres::connect(pg_config).await?;
                run_user_migrations(&pool).await?;
                Ok(Arc::new(PostgresUserRepository::new(pool)))
            }
        }
    }
}
