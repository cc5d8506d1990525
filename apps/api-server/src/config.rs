//! Application configuration loaded from environment variables.

use std::env;

use zerone_infra::{DatabaseConfig, JwtConfig, NotificationQueueConfig, env_or};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub notifications: NotificationQueueConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 100),
            min_connections: env_or("DB_MIN_CONNECTIONS", 10),
            sqlx_logging: env_or("DB_SQL_LOGGING", false),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            database,
            jwt: JwtConfig::from_env(),
            notifications: NotificationQueueConfig::from_env(),
        }
    }
}
