//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use maitre_app::tenancy::ActiveTenant;

use crate::auth::RequestIdentity;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: RequestIdentity);

    /// The caller attached by the auth gate.
    fn identity_or_401(&self) -> Result<&RequestIdentity, StatusError>;

    /// The tenant attached by the tenant resolver. Missing means the route
    /// was mounted without it.
    fn active_tenant_or_500(&self) -> Result<&ActiveTenant, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: RequestIdentity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<&RequestIdentity, StatusError> {
        self.obtain::<RequestIdentity>()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn active_tenant_or_500(&self) -> Result<&ActiveTenant, StatusError> {
        self.identity_or_401()?.tenant().ok_or_else(|| {
            error!("tenant-scoped handler reached without a resolved tenant");

            StatusError::internal_server_error()
        })
    }
}
