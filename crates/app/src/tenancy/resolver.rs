//! Tenant resolver.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    domain::{
        memberships::{MembershipsService, MembershipsServiceError, records::RoleId},
        tenants::{
            TenantsService, TenantsServiceError,
            records::{TenantRecord, TenantUuid},
        },
        users::records::UserUuid,
    },
    tenancy::TenantResolutionError,
};

/// How the active tenant was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantSource {
    /// The tenant the client asked for, after re-validating membership.
    Declared,

    /// Picked from the user's memberships because the declared one was
    /// absent or not usable.
    Fallback,
}

/// The tenant a request operates on and the caller's role there.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTenant {
    pub tenant: TenantRecord,
    pub role: RoleId,
    pub source: TenantSource,
}

impl ActiveTenant {
    #[must_use]
    pub fn uuid(&self) -> TenantUuid {
        self.tenant.uuid
    }
}

#[derive(Clone)]
pub struct TenantResolver {
    tenants: Arc<dyn TenantsService>,
    memberships: Arc<dyn MembershipsService>,
}

impl std::fmt::Debug for TenantResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantResolver").finish_non_exhaustive()
    }
}

impl TenantResolver {
    #[must_use]
    pub fn new(tenants: Arc<dyn TenantsService>, memberships: Arc<dyn MembershipsService>) -> Self {
        Self {
            tenants,
            memberships,
        }
    }

    /// Resolve the active tenant for `user`.
    ///
    /// A client-declared tenant is only honoured once membership has been
    /// confirmed server-side; otherwise the user's oldest membership is used.
    /// Transient storage failures are returned as-is and never treated as a
    /// miss.
    ///
    /// # Errors
    ///
    /// [`TenantResolutionError::NoTenantForUser`] when the user holds no
    /// membership in any live tenant.
    pub async fn resolve(
        &self,
        user: UserUuid,
        declared: Option<TenantUuid>,
    ) -> Result<ActiveTenant, TenantResolutionError> {
        if let Some(tenant) = declared {
            if let Some(active) = self.try_declared(user, tenant).await? {
                return Ok(active);
            }
        }

        self.fallback(user).await
    }

    async fn try_declared(
        &self,
        user: UserUuid,
        tenant: TenantUuid,
    ) -> Result<Option<ActiveTenant>, TenantResolutionError> {
        let role = match self.memberships.find_role(tenant, user).await {
            Ok(role) => role,
            Err(MembershipsServiceError::NotFound) => {
                debug!(%user, %tenant, "declared tenant is not a membership, falling back");

                return Ok(None);
            }
            Err(error) => return Err(error.into()),
        };

        match self.tenants.get_tenant(tenant).await {
            Ok(tenant) => Ok(Some(ActiveTenant {
                tenant,
                role,
                source: TenantSource::Declared,
            })),
            Err(TenantsServiceError::NotFound) => {
                debug!(%user, %tenant, "declared tenant no longer exists, falling back");

                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn fallback(&self, user: UserUuid) -> Result<ActiveTenant, TenantResolutionError> {
        let membership = match self.memberships.find_any_membership(user).await {
            Ok(membership) => membership,
            Err(MembershipsServiceError::NotFound) => {
                return Err(TenantResolutionError::NoTenantForUser);
            }
            Err(error) => return Err(error.into()),
        };

        match self.tenants.get_tenant(membership.tenant).await {
            Ok(tenant) => Ok(ActiveTenant {
                tenant,
                role: membership.role,
                source: TenantSource::Fallback,
            }),
            Err(TenantsServiceError::NotFound) => {
                warn!(%user, tenant = %membership.tenant, "membership references missing tenant");

                Err(TenantResolutionError::MissingTenant(membership.tenant))
            }
            Err(error) => Err(error.into()),
        }
    }
}
