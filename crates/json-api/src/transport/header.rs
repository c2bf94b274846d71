//! Header transport for mobile and API clients.

use salvo::{
    http::header::{AUTHORIZATION, HeaderValue},
    prelude::{Request, Response},
};
use tracing::warn;

use maitre_app::domain::tenants::records::TenantUuid;

use super::{ClientTransport, TransportKind, parse_tenant};

/// Carries the active tenant in both directions.
pub(crate) const ACTIVE_TENANT_HEADER: &str = "x-active-restaurant";

#[derive(Debug, Clone, Copy)]
pub(crate) struct HeaderTransport;

impl ClientTransport for HeaderTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Header
    }

    fn read_credential(&self, req: &Request) -> Option<String> {
        let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
        let mut parts = value.splitn(2, ' ');

        let scheme = parts.next()?;
        let token = parts.next()?.trim();

        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return None;
        }

        Some(token.to_string())
    }

    // Header clients hold the token themselves; login returns it in the body.
    fn write_credential(&self, _res: &mut Response, _token: &str) {}

    fn clear_credential(&self, _res: &mut Response) {}

    fn read_active_tenant(&self, req: &Request) -> Option<TenantUuid> {
        req.headers()
            .get(ACTIVE_TENANT_HEADER)?
            .to_str()
            .ok()
            .and_then(parse_tenant)
    }

    fn write_active_tenant(&self, res: &mut Response, tenant: TenantUuid) {
        match HeaderValue::from_str(&tenant.to_string()) {
            Ok(value) => {
                res.headers_mut().insert(ACTIVE_TENANT_HEADER, value);
            }
            Err(source) => warn!("could not encode active tenant header: {source}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use super::*;

    fn request_with(name: &'static str, value: &str) -> Request {
        TestClient::get("http://example.com")
            .add_header(name, value, true)
            .build()
    }

    #[test]
    fn reads_bearer_token() {
        let req = request_with("authorization", "Bearer abc123");

        assert_eq!(HeaderTransport.read_credential(&req).as_deref(), Some("abc123"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert!(
            HeaderTransport
                .read_credential(&request_with("authorization", "Basic abc123"))
                .is_none()
        );
        assert!(
            HeaderTransport
                .read_credential(&request_with("authorization", "Bearer "))
                .is_none()
        );
        assert!(
            HeaderTransport
                .read_credential(&TestClient::get("http://example.com").build())
                .is_none()
        );
    }

    #[test]
    fn reads_active_tenant_header() {
        let tenant = TenantUuid::new();

        let req = request_with(ACTIVE_TENANT_HEADER, &tenant.to_string());

        assert_eq!(HeaderTransport.read_active_tenant(&req), Some(tenant));
        assert!(
            HeaderTransport
                .read_active_tenant(&request_with(ACTIVE_TENANT_HEADER, "nope"))
                .is_none()
        );
    }

    #[test]
    fn writes_active_tenant_header() {
        let tenant = TenantUuid::new();
        let mut res = Response::new();

        HeaderTransport.write_active_tenant(&mut res, tenant);

        let written = res
            .headers()
            .get(ACTIVE_TENANT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(written, Some(tenant.to_string()));
    }
}
