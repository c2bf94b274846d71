//! Test helpers.

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    http::{cookie::Cookie, header::SET_COOKIE},
    prelude::*,
};

use jiff::Timestamp;
use maitre_app::{
    auth::MockAuthService,
    cache::MockCredentialCache,
    context::AppContext,
    domain::{
        memberships::MockMembershipsService,
        tenants::{
            MockTenantsService,
            records::{TenantRecord, TenantUuid},
        },
        users::records::UserUuid,
    },
    tenancy::TenantResolver,
};

use crate::{
    auth::{RequestIdentity, SessionToken},
    extensions::*,
    state::State,
    transport::{AUTH_COOKIE, Transports},
};

pub(crate) const SESSION_TOKEN: &str = "signed-session-token";

pub(crate) fn auth_cookie() -> String {
    format!("{AUTH_COOKIE}={SESSION_TOKEN}")
}

/// Stand-in for the auth gate: attaches `user` with [`SESSION_TOKEN`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct InjectIdentity(UserUuid);

#[salvo::handler]
impl InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_identity(RequestIdentity::new(
            self.0,
            SessionToken::from(SESSION_TOKEN.to_string()),
        ));

        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn inject_identity(user: UserUuid) -> InjectIdentity {
    InjectIdentity(user)
}

pub(crate) fn make_tenant(uuid: TenantUuid) -> TenantRecord {
    TenantRecord {
        uuid,
        name: "Chez Test".to_string(),
        alias: "chez-test".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A cookie set on `res`, whether still in the jar or already written out.
pub(crate) fn response_cookie(res: &Response, name: &str) -> Option<Cookie<'static>> {
    if let Some(cookie) = res.cookie(name) {
        return Some(cookie.clone());
    }

    res.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value.to_string()).ok())
        .find(|cookie| cookie.name() == name)
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_start_session().never();
    auth.expect_authenticate().never();
    auth.expect_end_session().never();
    auth.expect_issue_email_verification().never();
    auth.expect_verify_email().never();

    auth
}

fn strict_tenants_mock() -> MockTenantsService {
    let mut tenants = MockTenantsService::new();

    tenants.expect_get_tenant().never();

    tenants
}

fn strict_memberships_mock() -> MockMembershipsService {
    let mut memberships = MockMembershipsService::new();

    memberships.expect_find_role().never();
    memberships.expect_find_any_membership().never();

    memberships
}

fn strict_cache_mock() -> MockCredentialCache {
    let mut cache = MockCredentialCache::new();

    cache.expect_set().never();
    cache.expect_get().never();
    cache.expect_delete().never();
    cache.expect_ping().never();

    cache
}

pub(crate) fn make_state(
    auth: MockAuthService,
    tenants: MockTenantsService,
    memberships: MockMembershipsService,
    cache: MockCredentialCache,
) -> Arc<State> {
    let app = AppContext {
        auth: Arc::new(auth),
        tenants: TenantResolver::new(Arc::new(tenants), Arc::new(memberships)),
        cache: Arc::new(cache),
    };

    State::from_app_context(app, Transports::new(true))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(
        auth,
        strict_tenants_mock(),
        strict_memberships_mock(),
        strict_cache_mock(),
    )
}

pub(crate) fn state_with_tenancy(
    tenants: MockTenantsService,
    memberships: MockMembershipsService,
) -> Arc<State> {
    make_state(strict_auth_mock(), tenants, memberships, strict_cache_mock())
}

pub(crate) fn state_with_cache(cache: MockCredentialCache) -> Arc<State> {
    make_state(
        strict_auth_mock(),
        strict_tenants_mock(),
        strict_memberships_mock(),
        cache,
    )
}

pub(crate) fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}
