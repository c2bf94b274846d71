//! Credential Cache Config

use std::time::Duration;

use clap::Args;

use maitre_app::context::CacheBackend;

/// Which credential cache to run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CacheBackendKind {
    Redis,

    /// In-process map; sessions are lost on restart.
    Memory,
}

/// Credential cache settings.
#[derive(Debug, Args)]
pub struct CacheConfig {
    /// Cache backend (redis, memory)
    #[arg(long, env = "CACHE_BACKEND", value_enum, default_value_t = CacheBackendKind::Redis)]
    pub cache_backend: CacheBackendKind,

    /// Redis connection string
    #[arg(
        long,
        env = "REDIS_URL",
        default_value = "redis://127.0.0.1:6379",
        hide_env_values = true
    )]
    pub redis_url: String,

    /// Per-operation deadline in milliseconds
    #[arg(long, env = "CACHE_TIMEOUT_MS", default_value_t = 500_u64)]
    pub cache_timeout_ms: u64,
}

impl CacheConfig {
    #[must_use]
    pub fn backend(&self) -> CacheBackend {
        match self.cache_backend {
            CacheBackendKind::Redis => CacheBackend::Redis {
                url: self.redis_url.clone(),
                deadline: Duration::from_millis(self.cache_timeout_ms),
            },
            CacheBackendKind::Memory => CacheBackend::Memory,
        }
    }
}
