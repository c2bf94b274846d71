//! Email Verification Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::into_verification_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmailVerifiedResponse {
    /// The user whose email address is now verified
    pub user: Uuid,
}

/// Email Verification Handler
///
/// Consumes a single-use verification token.
#[endpoint(
    tags("email verifications"),
    summary = "Verify Email",
    responses(
        (status_code = StatusCode::OK, description = "Email verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing, invalid or used token"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Service Unavailable"),
    ),
)]
pub(crate) async fn handler(
    token: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<EmailVerifiedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(token) = token.into_inner().filter(|token| !token.trim().is_empty()) else {
        return Err(StatusError::bad_request().brief("Missing token"));
    };

    let user = state
        .app
        .auth
        .verify_email(token.trim())
        .await
        .map_err(into_verification_status_error)?;

    Ok(Json(EmailVerifiedResponse {
        user: user.into_uuid(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use maitre_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::users::records::UserUuid,
    };

    use crate::test_helpers::{service, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        service(
            state_with_auth(auth),
            Router::with_path("email-verifications").get(handler),
        )
    }

    #[tokio::test]
    async fn test_valid_token_verifies_user() -> TestResult {
        let user = UserUuid::new();

        let mut auth = MockAuthService::new();

        auth.expect_verify_email()
            .once()
            .withf(|token| token == "spt")
            .return_once(move |_| Ok(user));

        let mut res = TestClient::get("http://example.com/email-verifications?token=spt")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: EmailVerifiedResponse = res.take_json().await?;

        assert_eq!(body.user, user.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_token_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_verify_email().never();

        let res = TestClient::get("http://example.com/email-verifications")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_consumed_token_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_verify_email()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidToken));

        let res = TestClient::get("http://example.com/email-verifications?token=used")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
