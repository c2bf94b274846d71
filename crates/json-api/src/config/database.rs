//! Database Config

use std::time::Duration;

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Per-query deadline in milliseconds
    #[arg(long, env = "DATABASE_TIMEOUT_MS", default_value_t = 2_000_u64)]
    pub database_timeout_ms: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.database_timeout_ms)
    }
}
