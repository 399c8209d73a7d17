//! # Configuration Management
//!
//! Layered configuration for the load balancer API: built-in defaults, an
//! optional config file, then `LBAPI_*` environment variables
//! (`LBAPI_API__PORT=8081`, `LBAPI_DATABASE__URL=sqlite://./lb.db`, ...).

pub mod settings;

pub use settings::{ApiServerConfig, AppConfig, DatabaseConfig, ObservabilityConfig};

use crate::errors::Result;
use std::path::Path;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "LBAPI";

/// Application configuration alias used by the binary
pub type Config = AppConfig;

impl AppConfig {
    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration from an optional file, then environment variables
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let loaded: AppConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;

        tracing::debug!(
            api_address = %loaded.api.socket_address(),
            database_auto_migrate = loaded.database.auto_migrate,
            json_logging = loaded.observability.json_logging,
            "Configuration loaded"
        );

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert!(config.database.is_sqlite());
        assert!(config.api.port > 0);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("lbapi-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lbapi.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nport = 9181\n\n[database]\nmax_connections = 4").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.api.port, 9181);
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.api.bind_address, ApiServerConfig::default().bind_address);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let dir = std::env::temp_dir().join(format!("lbapi-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lbapi.toml");
        std::fs::write(&path, "[database]\nmax_connections = 0\n").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
