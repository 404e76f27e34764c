//! Configuration management

use serde::{Deserialize, Serialize};
use varchive_common::VarchiveError;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default archive database URL for local development.
pub const DEFAULT_ARCHIVE_DATABASE_URL: &str = "postgresql://localhost/varchive";

/// Default maximum archive database connections in the pool.
pub const DEFAULT_ARCHIVE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum archive database connections in the pool.
pub const DEFAULT_ARCHIVE_MIN_CONNECTIONS: u32 = 2;

/// Default database connection timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default base URL for per-species variant databases (database name appended).
pub const DEFAULT_VARIANT_DATABASE_URL: &str = "postgresql://localhost";

/// Default naming prefix for per-species variant databases.
pub const DEFAULT_VARIANT_DATABASE_PREFIX: &str = "eva_";

/// Default maximum connections per species variant database pool.
pub const DEFAULT_VARIANT_MAX_CONNECTIONS: u32 = 4;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub archive: ArchiveDbConfig,
    pub variant: VariantDbConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Archive (shared metadata) database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveDbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// Per-species variant database configuration
///
/// Variant databases share one server; each species maps to a database named
/// `<prefix><species>` (e.g. `eva_hsapiens_grch38`). The set of routable
/// species is loaded from the archive database at startup unless
/// `species_override` pins it explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantDbConfig {
    pub base_url: String,
    pub database_prefix: String,
    pub max_connections: u32,
    pub species_override: Option<Vec<String>>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> varchive_common::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("VARCHIVE_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: std::env::var("VARCHIVE_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: std::env::var("VARCHIVE_SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            archive: ArchiveDbConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_ARCHIVE_DATABASE_URL.to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_ARCHIVE_MAX_CONNECTIONS),
                min_connections: std::env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_ARCHIVE_MIN_CONNECTIONS),
                connect_timeout_secs: std::env::var("DATABASE_CONNECT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
                idle_timeout_secs: std::env::var("DATABASE_IDLE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS),
            },
            variant: VariantDbConfig {
                base_url: std::env::var("VARIANT_DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_VARIANT_DATABASE_URL.to_string()),
                database_prefix: std::env::var("VARIANT_DATABASE_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_VARIANT_DATABASE_PREFIX.to_string()),
                max_connections: std::env::var("VARIANT_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_VARIANT_MAX_CONNECTIONS),
                species_override: std::env::var("VARCHIVE_SPECIES").ok().map(|s| {
                    s.split(',')
                        .map(|sp| sp.trim().to_string())
                        .filter(|sp| !sp.is_empty())
                        .collect()
                }),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
                allow_credentials: std::env::var("CORS_ALLOW_CREDENTIALS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(true),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> varchive_common::Result<()> {
        if self.server.port == 0 {
            return Err(VarchiveError::config("Server port must be greater than 0"));
        }

        if self.archive.url.is_empty() {
            return Err(VarchiveError::config("Archive database URL cannot be empty"));
        }

        if self.archive.max_connections == 0 {
            return Err(VarchiveError::config(
                "Archive max_connections must be greater than 0",
            ));
        }

        if self.archive.min_connections > self.archive.max_connections {
            return Err(VarchiveError::config(format!(
                "Archive min_connections ({}) cannot be greater than max_connections ({})",
                self.archive.min_connections, self.archive.max_connections
            )));
        }

        if self.variant.base_url.is_empty() {
            return Err(VarchiveError::config(
                "Variant database base URL cannot be empty",
            ));
        }

        if self.variant.max_connections == 0 {
            return Err(VarchiveError::config(
                "Variant max_connections must be greater than 0",
            ));
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            archive: ArchiveDbConfig {
                url: DEFAULT_ARCHIVE_DATABASE_URL.to_string(),
                max_connections: DEFAULT_ARCHIVE_MAX_CONNECTIONS,
                min_connections: DEFAULT_ARCHIVE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            },
            variant: VariantDbConfig {
                base_url: DEFAULT_VARIANT_DATABASE_URL.to_string(),
                database_prefix: DEFAULT_VARIANT_DATABASE_PREFIX.to_string(),
                max_connections: DEFAULT_VARIANT_MAX_CONNECTIONS,
                species_override: None,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.archive.max_connections, 10);
        assert_eq!(config.variant.database_prefix, "eva_");
        assert!(config.variant.species_override.is_none());
    }

    #[test]
    fn test_config_validation_invalid_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(VarchiveError::Config(_))
        ));
    }

    #[test]
    fn test_config_validation_empty_archive_url() {
        let mut config = Config::default();
        config.archive.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_pool_size() {
        let mut config = Config::default();
        config.archive.min_connections = 20;
        config.archive.max_connections = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_variant_connections() {
        let mut config = Config::default();
        config.variant.max_connections = 0;
        assert!(config.validate().is_err());
    }
}
