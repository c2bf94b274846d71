//! Connection arguments shared by commands that touch the credential cache.

use std::{sync::Arc, time::Duration};

use clap::Args;
use maitre_app::{
    auth::CacheTokenService,
    cache::RedisCredentialCache,
    security::{SigningKeys, SigningSecret},
};

/// Cache and signing settings, read from the same variables as the server.
#[derive(Args)]
pub(crate) struct TokenArgs {
    /// Redis connection string
    #[arg(long, env = "REDIS_URL", hide_env_values = true)]
    redis_url: String,

    /// Per-operation deadline in milliseconds
    #[arg(long, env = "CACHE_TIMEOUT_MS", default_value_t = 500_u64)]
    cache_timeout_ms: u64,

    /// Secret for signing access tokens
    #[arg(long, env = "OAT_SECRET", hide_env_values = true, value_parser = non_empty)]
    oat_secret: String,

    /// Previous access token secret, still accepted during rotation
    #[arg(long, env = "OAT_PREVIOUS_SECRET", hide_env_values = true)]
    oat_previous_secret: Option<String>,

    /// Secret for signing purpose tokens
    #[arg(long, env = "SPT_SECRET", hide_env_values = true, value_parser = non_empty)]
    spt_secret: String,

    /// Previous purpose token secret, still accepted during rotation
    #[arg(long, env = "SPT_PREVIOUS_SECRET", hide_env_values = true)]
    spt_previous_secret: Option<String>,
}

impl std::fmt::Debug for TokenArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenArgs")
            .field("cache_timeout_ms", &self.cache_timeout_ms)
            .finish_non_exhaustive()
    }
}

impl TokenArgs {
    pub(crate) async fn token_service(&self) -> Result<CacheTokenService, String> {
        let cache = RedisCredentialCache::connect(
            &self.redis_url,
            Duration::from_millis(self.cache_timeout_ms),
        )
        .await
        .map_err(|error| format!("failed to connect to credential cache: {error}"))?;

        Ok(CacheTokenService::new(
            Arc::new(cache),
            self.oat_keys(),
            self.spt_keys(),
        ))
    }

    fn oat_keys(&self) -> SigningKeys {
        keys(&self.oat_secret, self.oat_previous_secret.as_deref())
    }

    fn spt_keys(&self) -> SigningKeys {
        keys(&self.spt_secret, self.spt_previous_secret.as_deref())
    }
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("secret must not be empty".to_string());
    }

    Ok(value.to_string())
}

fn keys(current: &str, previous: Option<&str>) -> SigningKeys {
    SigningKeys::with_previous(
        SigningSecret::from(current),
        previous.filter(|secret| !secret.is_empty()).map(SigningSecret::from),
    )
}
