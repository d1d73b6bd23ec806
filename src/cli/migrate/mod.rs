//! Migrate command - applies the user schema to PostgreSQL

use tracing::info;

use crate::infrastructure::storage::{self, PostgresMigrator, StorageConfig};

/// Run pending migrations against the configured database
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let pg_config = match config.storage.to_storage_config()? {
        StorageConfig::Postgres(pg_config) => pg_config,
        StorageConfig::InMemory => {
            anyhow::bail!("migrate requires storage.backend = \"postgres\"")
        }
    };

    let pool = storage::connect(&pg_config).await?;
    storage::run_user_migrations(&pool).await?;

    let version = PostgresMigrator::new(pool).current_version().await?;
    info!(?version, "Migrations complete");

    Ok(())
}
