//! Configuration management

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/baseload";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default number of connection attempts before startup gives up.
pub const DEFAULT_DATABASE_CONNECT_RETRIES: u32 = 10;

/// Default interval between connection attempts in seconds.
pub const DEFAULT_DATABASE_RETRY_INTERVAL_SECS: u64 = 1;

/// Default number of records per bulk insert.
pub const DEFAULT_BULK_SIZE: usize = 1000;

/// Default number of records per normalization page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Default input file name.
pub const DEFAULT_INPUT_FILE: &str = "base.txt";

/// Loader configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub pipeline: PipelineConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub connect_retries: u32,
    pub retry_interval_secs: u64,
}

/// Bulk-processing configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub bulk_size: usize,
    pub page_size: usize,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
                connect_retries: env_or("DATABASE_CONNECT_RETRIES", DEFAULT_DATABASE_CONNECT_RETRIES),
                retry_interval_secs: env_or(
                    "DATABASE_RETRY_INTERVAL",
                    DEFAULT_DATABASE_RETRY_INTERVAL_SECS,
                ),
            },
            pipeline: PipelineConfig {
                bulk_size: env_or("BASELOAD_BULK_SIZE", DEFAULT_BULK_SIZE),
                page_size: env_or("BASELOAD_PAGE_SIZE", DEFAULT_PAGE_SIZE),
            },
        };

        Ok(config)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::load().unwrap();

        assert_eq!(config.database.max_connections, DEFAULT_DATABASE_MAX_CONNECTIONS);
        assert_eq!(config.database.connect_retries, DEFAULT_DATABASE_CONNECT_RETRIES);
        assert_eq!(config.pipeline.bulk_size, DEFAULT_BULK_SIZE);
        assert_eq!(config.pipeline.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        // unset key
        assert_eq!(env_or("BASELOAD_TEST_UNSET_KEY", 42u32), 42);
    }
}
