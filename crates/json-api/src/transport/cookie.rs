//! Cookie transport for browser clients.

use salvo::{
    http::cookie::{Cookie, SameSite, time::Duration},
    prelude::{Request, Response},
};

use maitre_app::domain::tenants::records::TenantUuid;

use super::{ClientTransport, TransportKind, parse_tenant};

pub(crate) const AUTH_COOKIE: &str = "maitre_session";
pub(crate) const TENANT_COOKIE: &str = "maitre_active_restaurant";

/// Client-side lifetime of the auth cookie. Refreshed on every authenticated
/// request and always shorter than the server-side token TTL.
pub(crate) const AUTH_COOKIE_MAX_AGE: Duration = Duration::hours(1);
const TENANT_COOKIE_MAX_AGE: Duration = Duration::days(1);

#[derive(Debug, Clone, Copy)]
pub(crate) struct CookieTransport {
    secure: bool,
}

impl CookieTransport {
    #[must_use]
    pub(crate) fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn cookie(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(max_age)
            .build()
    }
}

impl ClientTransport for CookieTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Cookie
    }

    fn read_credential(&self, req: &Request) -> Option<String> {
        req.cookie(AUTH_COOKIE)
            .map(|cookie| cookie.value().trim())
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    }

    fn write_credential(&self, res: &mut Response, token: &str) {
        res.add_cookie(self.cookie(AUTH_COOKIE, token.to_string(), AUTH_COOKIE_MAX_AGE));
    }

    fn clear_credential(&self, res: &mut Response) {
        res.add_cookie(self.cookie(AUTH_COOKIE, String::new(), Duration::ZERO));
    }

    fn read_active_tenant(&self, req: &Request) -> Option<TenantUuid> {
        req.cookie(TENANT_COOKIE)
            .and_then(|cookie| parse_tenant(cookie.value()))
    }

    fn write_active_tenant(&self, res: &mut Response, tenant: TenantUuid) {
        res.add_cookie(self.cookie(TENANT_COOKIE, tenant.to_string(), TENANT_COOKIE_MAX_AGE));
    }
}
