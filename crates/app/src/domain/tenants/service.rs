//! Tenants service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::tenants::{
        errors::TenantsServiceError,
        records::{TenantRecord, TenantUuid},
        repository::PgTenantsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgTenantsService {
    repository: PgTenantsRepository,
}

impl PgTenantsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgTenantsRepository::new(db),
        }
    }
}

#[async_trait]
impl TenantsService for PgTenantsService {
    async fn get_tenant(&self, tenant: TenantUuid) -> Result<TenantRecord, TenantsServiceError> {
        self.repository
            .get_tenant(tenant)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Tenant lookups.
pub trait TenantsService: Send + Sync {
    /// Fetch a live (not soft-deleted) tenant.
    async fn get_tenant(&self, tenant: TenantUuid) -> Result<TenantRecord, TenantsServiceError>;
}
