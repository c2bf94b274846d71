//! Auth Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use maitre_app::auth::AuthServiceError;

/// Map a session failure to a response without revealing which check failed.
pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidToken => StatusError::unauthorized().brief("Unauthorized"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::EmailTaken => StatusError::conflict().brief("Email already taken"),
        AuthServiceError::DeadlineExceeded(deadline) => {
            warn!("auth dependency exceeded its {deadline:?} deadline");

            StatusError::service_unavailable()
        }
        AuthServiceError::Cache(source) => {
            error!("credential cache unavailable: {source}");

            StatusError::service_unavailable()
        }
        AuthServiceError::Users(source) => {
            error!("user lookup failed: {source}");

            StatusError::service_unavailable()
        }
        AuthServiceError::Entropy(source) => {
            error!("failed to generate token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to hash or verify password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Signing(source) => {
            error!("failed to sign token: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Token-consuming flows report a bad token as a bad request.
pub(crate) fn into_verification_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidToken => StatusError::bad_request().brief("Invalid token"),
        error => into_status_error(error),
    }
}
