//! Log Out Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Log Out Handler
#[endpoint(
    tags("sessions"),
    summary = "Log Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session ended"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    state
        .app
        .auth
        .end_session(identity.token().as_str())
        .await
        .map_err(into_status_error)?;

    state.transports.select(req).clear_credential(res);

    info!(user = %identity.user(), "session ended");

    Ok(StatusCode::NO_CONTENT)
}
