//! Current Session Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use maitre_app::tenancy::ActiveTenant;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActiveTenantResponse {
    /// The restaurant's unique identifier
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// URL-friendly handle
    pub alias: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CurrentSessionResponse {
    /// The signed-in user
    pub user: Uuid,

    /// The restaurant this request acted on
    pub tenant: ActiveTenantResponse,

    /// The user's role inside that restaurant
    pub role: i16,
}

impl From<&ActiveTenant> for ActiveTenantResponse {
    fn from(active: &ActiveTenant) -> Self {
        Self {
            uuid: active.uuid().into_uuid(),
            name: active.tenant.name.clone(),
            alias: active.tenant.alias.clone(),
        }
    }
}

/// Current Session Handler
///
/// Returns the caller and the restaurant the request was scoped to.
#[endpoint(
    tags("sessions"),
    summary = "Current Session",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current session"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "No restaurant found for user"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CurrentSessionResponse>, StatusError> {
    let identity = depot.identity_or_401()?;
    let active = depot.active_tenant_or_500()?;

    Ok(Json(CurrentSessionResponse {
        user: identity.user().into_uuid(),
        tenant: active.into(),
        role: active.role.get(),
    }))
}
