//! Maitre JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Credential cache status
    pub cache: String,
}

/// Healthcheck handler
///
/// Reports whether the credential cache is reachable. Without it no request
/// can be authenticated, so an unreachable cache makes the service unhealthy.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Err(error) = state.app.cache.ping().await {
        warn!("credential cache healthcheck failed: {error}");

        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return Ok(Json(HealthResponse {
            status: "degraded".to_string(),
            cache: "unavailable".to_string(),
        }));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        cache: "ok".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use maitre_app::cache::{CacheError, MockCredentialCache};

    use crate::test_helpers::{service, state_with_cache};

    use super::*;

    fn make_service(cache: MockCredentialCache) -> Service {
        service(
            state_with_cache(cache),
            Router::with_path("healthcheck").get(handler),
        )
    }

    #[tokio::test]
    async fn test_healthcheck() -> TestResult {
        let mut cache = MockCredentialCache::new();

        cache.expect_ping().once().return_once(|| Ok(()));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(cache))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(response.status, "ok");
        assert_eq!(response.cache, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_cache_is_unhealthy() -> TestResult {
        let mut cache = MockCredentialCache::new();

        cache
            .expect_ping()
            .once()
            .return_once(|| Err(CacheError::DeadlineExceeded(Duration::from_millis(500))));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(cache))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(response.cache, "unavailable");

        Ok(())
    }
}
