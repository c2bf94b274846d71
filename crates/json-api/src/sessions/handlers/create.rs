//! Log In Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::into_status_error, extensions::*, state::State, transport::TransportKind};

/// Log In Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Session Created Response
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionCreatedResponse {
    /// The signed-in user
    pub user: Uuid,

    /// Access token for header-based clients; browsers receive a cookie instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Log In Handler
#[endpoint(
    tags("sessions"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::CREATED, description = "Session started"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::FORBIDDEN, description = "Already authenticated"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let login = json.into_inner();

    if login.email.trim().is_empty() || login.password.is_empty() {
        return Err(StatusError::bad_request().brief("Email and password are required"));
    }

    let session = state
        .app
        .auth
        .login(login.email.trim(), &login.password)
        .await
        .map_err(into_status_error)?;

    let transport = state.transports.select(req);

    transport.write_credential(res, &session.token);

    let access_token = match transport.kind() {
        TransportKind::Header => Some(session.token),
        TransportKind::Cookie => None,
    };

    res.status_code(StatusCode::CREATED);

    Ok(Json(SessionCreatedResponse {
        user: session.user.into_uuid(),
        access_token,
    }))
}
