//! Tenant resolution errors.

use std::time::Duration;

use thiserror::Error;

use crate::domain::{
    memberships::MembershipsServiceError,
    tenants::{TenantsServiceError, records::TenantUuid},
};

#[derive(Debug, Error)]
pub enum TenantResolutionError {
    /// The user belongs to no live tenant at all.
    #[error("user has no tenant")]
    NoTenantForUser,

    /// A membership returned by storage points at a tenant that cannot be read.
    #[error("membership references missing tenant {0}")]
    MissingTenant(TenantUuid),

    #[error("tenant lookup exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("membership lookup failed")]
    Memberships(#[source] MembershipsServiceError),

    #[error("tenant lookup failed")]
    Tenants(#[source] TenantsServiceError),
}

impl TenantResolutionError {
    /// Whether retrying the same request later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::DeadlineExceeded(_) | Self::Memberships(_) | Self::Tenants(_)
        )
    }
}

impl From<MembershipsServiceError> for TenantResolutionError {
    fn from(error: MembershipsServiceError) -> Self {
        match error {
            MembershipsServiceError::DeadlineExceeded(deadline) => Self::DeadlineExceeded(deadline),
            error => Self::Memberships(error),
        }
    }
}

impl From<TenantsServiceError> for TenantResolutionError {
    fn from(error: TenantsServiceError) -> Self {
        match error {
            TenantsServiceError::DeadlineExceeded(deadline) => Self::DeadlineExceeded(deadline),
            error => Self::Tenants(error),
        }
    }
}
