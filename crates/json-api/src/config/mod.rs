//! Server configuration module

use clap::Parser;

use crate::config::{
    app::AppConfig, cache::CacheConfig, database::DatabaseConfig, logging::LoggingConfig,
    security::SecurityConfig, server::ServerRuntimeConfig,
};

pub(crate) mod app;
pub(crate) mod cache;
pub(crate) mod database;
pub(crate) mod logging;
pub(crate) mod security;
pub(crate) mod server;

/// Maitre JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "maitre-json", about = "Maitre JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Deployment environment settings.
    #[command(flatten)]
    pub app: AppConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Credential cache settings.
    #[command(flatten)]
    pub cache: CacheConfig,

    /// Token signing secrets.
    #[command(flatten)]
    pub security: SecurityConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::config::{app::AppEnv, cache::CacheBackendKind, logging::LogFormat};

    use super::*;

    const REQUIRED: [&str; 7] = [
        "maitre-json",
        "--database-url",
        "postgres://localhost/maitre",
        "--oat-secret",
        "oat-secret",
        "--spt-secret",
        "spt-secret",
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.app.app_env, AppEnv::Production);
        assert!(matches!(config.logging.log_format, LogFormat::Compact));
        assert_eq!(config.cache.cache_backend, CacheBackendKind::Redis);
        assert_eq!(config.cache.cache_timeout_ms, 500);
        assert!(config.security.oat_previous_secret.is_none());

        Ok(())
    }

    #[test]
    fn missing_secrets_are_rejected() {
        let result = ServerConfig::try_parse_from([
            "maitre-json",
            "--database-url",
            "postgres://localhost/maitre",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn dev_environment_is_parsed() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED.iter().copied().chain([
            "--app-env",
            "dev",
            "--cache-backend",
            "memory",
        ]))?;

        assert_eq!(config.app.app_env, AppEnv::Dev);
        assert!(!config.app.app_env.secure_cookies());
        assert_eq!(config.cache.cache_backend, CacheBackendKind::Memory);

        Ok(())
    }

    #[test]
    fn blank_secret_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "maitre-json",
            "--database-url",
            "postgres://localhost/maitre",
            "--oat-secret",
            "  ",
            "--spt-secret",
            "spt-secret",
        ]);

        assert!(result.is_err());
    }
}
