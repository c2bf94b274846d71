//! Tenant Errors

use salvo::http::StatusError;
use tracing::error;

use maitre_app::tenancy::TenantResolutionError;

pub(crate) fn into_status_error(error: TenantResolutionError) -> StatusError {
    match error {
        TenantResolutionError::NoTenantForUser => {
            StatusError::forbidden().brief("No restaurant found for user")
        }
        TenantResolutionError::MissingTenant(tenant) => {
            error!(%tenant, "membership references a missing tenant");

            StatusError::internal_server_error()
        }
        error if error.is_transient() => {
            error!("tenant resolution failed: {error}");

            StatusError::service_unavailable()
        }
        error => {
            error!("tenant resolution failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn no_tenant_is_forbidden() {
        assert_eq!(
            into_status_error(TenantResolutionError::NoTenantForUser).code,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn deadline_is_unavailable() {
        assert_eq!(
            into_status_error(TenantResolutionError::DeadlineExceeded(Duration::from_millis(1)))
                .code,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
