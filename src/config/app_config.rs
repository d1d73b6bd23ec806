use serde::Deserialize;

use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 5,
            connect_timeout_secs: 30,
        }
    }
}

impl StorageSection {
    /// Resolve the section into a concrete storage configuration
    pub fn to_storage_config(&self) -> anyhow::Result<StorageConfig> {
        let backend = StorageType::from_str(&self.backend)
            .ok_or_else(|| anyhow::anyhow!("Unknown storage backend '{}'", self.backend))?;

        match backend {
            StorageType::InMemory => Ok(StorageConfig::InMemory),
            StorageType::Postgres => {
                let url = self.database_url.clone().ok_or_else(|| {
                    anyhow::anyhow!("storage.database_url is required for the postgres backend")
                })?;

                Ok(StorageConfig::Postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(self.max_connections)
                        .with_connect_timeout(self.connect_timeout_secs),
                ))
            }
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.storage.max_connections, 5);
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = config::Config::builder()
            .set_override("server.host", "127.0.0.1")
            .unwrap()
            .set_override("server.port", 9000)
            .unwrap()
            .set_override("logging.level", "debug")
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.storage.backend, "memory");
    }

    fn from_override(key: &str, value: impl Into<config::Value>) -> AppConfig {
        config::Config::builder()
            .set_override(key, value)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_single_key_keeps_section_defaults() {
        let config = from_override("server.port", 9000);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");

        let config = from_override("logging.format", "json");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");

        let config = from_override("storage.database_url", "postgres://localhost/dust");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(
            config.storage.database_url.as_deref(),
            Some("postgres://localhost/dust")
        );
        assert_eq!(config.storage.max_connections, 5);
    }

    #[test]
    fn test_storage_timeout_reaches_pool_config() {
        let section = StorageSection {
            backend: "postgres".to_string(),
            database_url: Some("postgres://localhost/dust".to_string()),
            connect_timeout_secs: 3,
            ..StorageSection::default()
        };

        match section.to_storage_config().unwrap() {
            StorageConfig::Postgres(pg) => assert_eq!(pg.connect_timeout_secs, 3),
            other => panic!("expected postgres config, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_storage_config() {
        let storage = StorageSection::default().to_storage_config().unwrap();
        assert_eq!(storage.storage_type(), StorageType::InMemory);
    }

    #[test]
    fn test_postgres_requires_url() {
        let section = StorageSection {
            backend: "postgres".to_string(),
            ..StorageSection::default()
        };
        assert!(section.to_storage_config().is_err());

        let section = StorageSection {
            database_url: Some("postgres://localhost/dust".to_string()),
            ..section
        };
        match section.to_storage_config().unwrap() {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://localhost/dust");
                assert_eq!(pg.max_connections, 5);
                assert_eq!(pg.connect_timeout_secs, 30);
            }
            other => panic!("expected postgres config, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_backend() {
        let section = StorageSection {
            backend: "redis".to_string(),
            ..StorageSection::default()
        };
        assert!(section.to_storage_config().is_err());
    }
}
