//! Client transport: where a client keeps its credential and active tenant.
//!
//! Browsers use cookies. Anything that sends `Client-Type: mobile` uses an
//! `Authorization: Bearer` header and a dedicated active-tenant header. The
//! variant is picked once per request and every reader and writer goes
//! through it, so both channels behave the same.

mod cookie;
mod header;

use salvo::prelude::{Request, Response};

use maitre_app::domain::tenants::records::TenantUuid;

pub(crate) use cookie::{AUTH_COOKIE, CookieTransport, TENANT_COOKIE};
pub(crate) use header::{ACTIVE_TENANT_HEADER, HeaderTransport};

/// Header that marks a request as coming from a non-browser client.
pub(crate) const CLIENT_TYPE_HEADER: &str = "client-type";

const MOBILE_CLIENT: &str = "mobile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransportKind {
    Cookie,
    Header,
}

/// Symmetric read/write access to a client's credential and active tenant.
pub(crate) trait ClientTransport: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// The signed access token, if the client sent a well-formed one.
    fn read_credential(&self, req: &Request) -> Option<String>;

    /// Hand the credential back to the client. Refreshes client-side expiry.
    fn write_credential(&self, res: &mut Response, token: &str);

    /// Tell the client to forget its credential.
    fn clear_credential(&self, res: &mut Response);

    /// The tenant the client claims to be working in. Malformed ids read as
    /// absent.
    fn read_active_tenant(&self, req: &Request) -> Option<TenantUuid>;

    fn write_active_tenant(&self, res: &mut Response, tenant: TenantUuid);
}

/// Both transport variants, configured once at startup.
#[derive(Debug, Clone)]
pub(crate) struct Transports {
    cookie: CookieTransport,
    header: HeaderTransport,
}

impl Transports {
    #[must_use]
    pub(crate) fn new(secure_cookies: bool) -> Self {
        Self {
            cookie: CookieTransport::new(secure_cookies),
            header: HeaderTransport,
        }
    }

    /// Pick the transport for `req` from its client-type marker.
    pub(crate) fn select(&self, req: &Request) -> &dyn ClientTransport {
        if is_mobile(req) {
            &self.header
        } else {
            &self.cookie
        }
    }
}

fn is_mobile(req: &Request) -> bool {
    req.headers()
        .get(CLIENT_TYPE_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case(MOBILE_CLIENT))
}

fn parse_tenant(value: &str) -> Option<TenantUuid> {
    value.parse().ok()
}
