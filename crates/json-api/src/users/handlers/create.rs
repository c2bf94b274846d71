//! Register Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use maitre_app::{auth::Registration, domain::users::records::UserRecord};

use crate::{auth::into_status_error, extensions::*, state::State, transport::TransportKind};

const MAX_NAME_CHARS: usize = 50;
const MIN_PASSWORD_CHARS: usize = 8;

/// Register Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegisterRequest {
    fn into_registration(self) -> Result<Registration, StatusError> {
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
            return Err(StatusError::bad_request().brief("Name must be 1 to 50 characters"));
        }

        if email.is_empty() || !email.contains('@') {
            return Err(StatusError::bad_request().brief("A valid email is required"));
        }

        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(StatusError::bad_request().brief("Password must be at least 8 characters"));
        }

        Ok(Registration {
            name: name.to_owned(),
            email: email.to_owned(),
            password: self.password,
        })
    }
}

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            name: user.name,
            email: user.email,
            email_verified: user.email_verified,
        }
    }
}

/// User Created Response
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct UserCreatedResponse {
    pub user: UserResponse,

    /// Access token for header-based clients; browsers receive a cookie instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Register Handler
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User created and signed in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Already authenticated"),
        (status_code = StatusCode::CONFLICT, description = "Email already taken"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let registration = json.into_inner().into_registration()?;

    let session = state
        .app
        .auth
        .register(registration)
        .await
        .map_err(into_status_error)?;

    let transport = state.transports.select(req);

    transport.write_credential(res, &session.token);

    let access_token = match transport.kind() {
        TransportKind::Header => Some(session.token),
        TransportKind::Cookie => None,
    };

    res.status_code(StatusCode::CREATED);

    Ok(Json(UserCreatedResponse {
        user: session.user.into(),
        access_token,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use maitre_app::{
        auth::{AuthServiceError, MockAuthService, RegisteredSession},
        domain::users::records::UserUuid,
    };

    use crate::{
        test_helpers::{response_cookie, service, state_with_auth},
        transport::{AUTH_COOKIE, CLIENT_TYPE_HEADER},
    };

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        service(state_with_auth(auth), Router::with_path("users").post(handler))
    }

    fn registering(user: UserUuid) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|registration| {
                registration.name == "Ada"
                    && registration.email == "ada@example.com"
                    && registration.password == "long-enough"
            })
            .return_once(move |registration| {
                Ok(RegisteredSession {
                    user: UserRecord {
                        uuid: user,
                        name: registration.name,
                        email: registration.email,
                        email_verified: false,
                    },
                    token: "fresh-token".to_string(),
                })
            });

        auth
    }

    fn strict_auth() -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_register().never();

        auth
    }

    fn body() -> serde_json::Value {
        json!({ "name": " Ada ", "email": " ada@example.com ", "password": "long-enough" })
    }

    #[tokio::test]
    async fn test_browser_registration_sets_cookie() -> TestResult {
        let user = UserUuid::new();

        let mut res = TestClient::post("http://example.com/users")
            .json(&body())
            .send(&make_service(registering(user)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let cookie = response_cookie(&res, AUTH_COOKIE).ok_or("auth cookie not set")?;

        assert_eq!(cookie.value(), "fresh-token");

        let body: UserCreatedResponse = res.take_json().await?;

        assert_eq!(body.user.uuid, user.into_uuid());
        assert!(!body.user.email_verified);
        assert!(body.access_token.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_mobile_registration_returns_token_in_body() -> TestResult {
        let mut res = TestClient::post("http://example.com/users")
            .add_header(CLIENT_TYPE_HEADER, "mobile", true)
            .json(&body())
            .send(&make_service(registering(UserUuid::new())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(response_cookie(&res, AUTH_COOKIE).is_none());

        let body: UserCreatedResponse = res.take_json().await?;

        assert_eq!(body.access_token.as_deref(), Some("fresh-token"));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_registering() -> TestResult {
        for payload in [
            json!({ "name": "  ", "email": "ada@example.com", "password": "long-enough" }),
            json!({ "name": "a".repeat(51), "email": "ada@example.com", "password": "long-enough" }),
            json!({ "name": "Ada", "email": "not-an-email", "password": "long-enough" }),
            json!({ "name": "Ada", "email": "ada@example.com", "password": "short" }),
        ] {
            let res = TestClient::post("http://example.com/users")
                .json(&payload)
                .send(&make_service(strict_auth()))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_taken_email_returns_409() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/users")
            .json(&body())
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
