//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, CacheTokenService, TokenAuthService},
    cache::{CacheError, CredentialCache, MemoryCredentialCache, RedisCredentialCache},
    database::{self, Db},
    domain::{
        memberships::PgMembershipsService, tenants::PgTenantsService, users::PgUsersService,
    },
    security::SigningKeys,
    tenancy::TenantResolver,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to connect to credential cache")]
    Cache(#[source] CacheError),
}

/// Where credentials live.
#[derive(Debug, Clone)]
pub enum CacheBackend {
    Redis { url: String, deadline: Duration },

    /// Process-local; credentials do not survive a restart.
    Memory,
}

/// Everything needed to wire up the services.
#[derive(Debug)]
pub struct AppSettings {
    pub database_url: String,
    pub database_deadline: Duration,
    pub cache: CacheBackend,
    pub oat_keys: SigningKeys,
    pub spt_keys: SigningKeys,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub tenants: TenantResolver,
    pub cache: Arc<dyn CredentialCache>,
}

impl AppContext {
    /// Connect to storage and the credential cache and build the services.
    ///
    /// # Errors
    ///
    /// Returns an error when either connection cannot be established.
    pub async fn connect(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool, settings.database_deadline);

        let cache: Arc<dyn CredentialCache> = match &settings.cache {
            CacheBackend::Redis { url, deadline } => Arc::new(
                RedisCredentialCache::connect(url, *deadline)
                    .await
                    .map_err(AppInitError::Cache)?,
            ),
            CacheBackend::Memory => {
                info!("using in-process credential cache");

                Arc::new(MemoryCredentialCache::new())
            }
        };

        let tokens = Arc::new(CacheTokenService::new(
            Arc::clone(&cache),
            settings.oat_keys,
            settings.spt_keys,
        ));

        Ok(Self {
            auth: Arc::new(TokenAuthService::new(
                tokens,
                Arc::new(PgUsersService::new(db.clone())),
            )),
            tenants: TenantResolver::new(
                Arc::new(PgTenantsService::new(db.clone())),
                Arc::new(PgMembershipsService::new(db)),
            ),
            cache,
        })
    }
}
