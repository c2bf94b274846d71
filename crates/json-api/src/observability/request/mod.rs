//! Per-request span, correlation id and outcome logging.

mod request_ids;
mod threshold;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, field, info, warn};

use crate::auth::RequestIdentity;

pub(crate) use request_ids::RequestId;
pub(crate) use threshold::set_slow_request_threshold;

/// Wrap the rest of the chain in an `http.request` span.
///
/// The span picks up the authenticated user and active restaurant once the
/// gates further down have attached them.
#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let started = Instant::now();

    let request_id =
        RequestId::from_header(req.header::<String>(request_ids::REQUEST_ID_HEADER).as_deref());

    request_id.write_header(res);

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        status = field::Empty,
        duration_ms = field::Empty,
        user = field::Empty,
        tenant = field::Empty,
    );

    depot.inject(request_id);

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);
    let duration_ms = elapsed.as_millis();

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    if let Ok(identity) = depot.obtain::<RequestIdentity>() {
        record_identity(&span, identity);
    }

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = status.as_u16(), duration_ms, "request.failed");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), duration_ms, "request.rejected");
        } else {
            info!(status = status.as_u16(), duration_ms, "request.completed");
        }

        let threshold = threshold::slow_request_threshold();

        if elapsed > threshold {
            warn!(
                duration_ms,
                threshold_ms = threshold.as_millis(),
                "slow request detected"
            );
        }
    });
}

fn record_identity(span: &Span, identity: &RequestIdentity) {
    span.record("user", field::display(identity.user()));

    if let Some(tenant) = identity.tenant() {
        span.record("tenant", field::display(tenant.uuid()));
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn echo_request_id(depot: &mut Depot, res: &mut Response) {
        let id = depot
            .obtain::<RequestId>()
            .map_or_else(|_| "missing".to_string(), ToString::to_string);

        res.render(id);
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::new().get(echo_request_id)),
        )
    }

    fn echoed_header(res: &Response) -> Option<String> {
        res.headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    }

    #[tokio::test]
    async fn incoming_request_id_is_kept_and_echoed() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header("x-request-id", "req-123", true)
            .send(&make_service())
            .await;

        assert_eq!(echoed_header(&res).as_deref(), Some("req-123"));
        assert_eq!(res.take_string().await?, "req-123");

        Ok(())
    }

    #[tokio::test]
    async fn missing_request_id_is_generated_and_echoed() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .send(&make_service())
            .await;

        let header = echoed_header(&res);
        let body = res.take_string().await?;

        assert!(uuid::Uuid::parse_str(&body).is_ok());
        assert_eq!(header.as_deref(), Some(body.as_str()));

        Ok(())
    }
}
