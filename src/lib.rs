//! Dust Users API
//!
//! User accounts holding a virtual "dust" balance:
//! - Validated user entity with aggregated field errors
//! - Add-dust use case over a pluggable repository
//! - In-memory and PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.to_storage_config()?;
    let repository = StorageFactory::create_user_repository(&storage_config).await?;

    info!("Application state initialized");
    Ok(AppState::new(repository))
}
