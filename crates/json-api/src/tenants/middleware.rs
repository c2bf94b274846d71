//! Tenant resolver middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::debug;

use crate::{extensions::*, state::State, tenants::into_status_error};

/// Attach the active tenant and role to the request identity and echo the
/// tenant back to the client. Must run after the auth gate.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(status) => {
            res.render(status);

            return;
        }
    };

    let identity = match depot.identity_or_401() {
        Ok(identity) => identity.clone(),
        Err(status) => {
            res.render(status);

            return;
        }
    };

    let transport = state.transports.select(req);
    let declared = transport.read_active_tenant(req);

    let active = match state.app.tenants.resolve(identity.user(), declared).await {
        Ok(active) => active,
        Err(error) => {
            res.render(into_status_error(error));

            return;
        }
    };

    debug!(
        user = %identity.user(),
        tenant = %active.uuid(),
        role = %active.role,
        source = ?active.source,
        "tenant resolved"
    );

    transport.write_active_tenant(res, active.uuid());

    depot.insert_identity(identity.with_tenant(active));

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::predicate::eq;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use maitre_app::domain::{
        memberships::{
            MembershipsServiceError, MockMembershipsService,
            records::{MembershipRecord, RoleId},
        },
        tenants::{MockTenantsService, records::TenantUuid},
        users::records::UserUuid,
    };

    use crate::{
        test_helpers::{inject_identity, make_tenant, response_cookie, service, state_with_tenancy},
        transport::{ACTIVE_TENANT_HEADER, CLIENT_TYPE_HEADER, TENANT_COOKIE},
    };

    use super::*;

    #[salvo::handler]
    async fn echo_tenant(depot: &mut Depot, res: &mut Response) {
        let tenant = depot.active_tenant_or_500().map_or_else(
            |_| "missing".to_string(),
            |active| format!("{}:{}", active.uuid(), active.role),
        );

        res.render(tenant);
    }

    fn make_service(
        user: UserUuid,
        tenants: MockTenantsService,
        memberships: MockMembershipsService,
    ) -> Service {
        service(
            state_with_tenancy(tenants, memberships),
            Router::new()
                .hoop(inject_identity(user))
                .hoop(handler)
                .push(Router::new().get(echo_tenant)),
        )
    }

    fn member_of(tenant: TenantUuid, role: i16) -> MockMembershipsService {
        let mut memberships = MockMembershipsService::new();

        memberships
            .expect_find_role()
            .with(eq(tenant), mockall::predicate::always())
            .returning(move |_, _| Ok(RoleId::new(role)));

        memberships
    }

    fn existing_tenants() -> MockTenantsService {
        let mut tenants = MockTenantsService::new();

        tenants
            .expect_get_tenant()
            .returning(|uuid| Ok(make_tenant(uuid)));

        tenants
    }

    #[tokio::test]
    async fn test_declared_cookie_tenant_is_used_and_echoed() -> TestResult {
        let user = UserUuid::new();
        let tenant = TenantUuid::new();

        let mut memberships = member_of(tenant, 2);

        memberships.expect_find_any_membership().never();

        let mut res = TestClient::get("http://example.com")
            .add_header("cookie", format!("{TENANT_COOKIE}={tenant}"), true)
            .send(&make_service(user, existing_tenants(), memberships))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let cookie = response_cookie(&res, TENANT_COOKIE).ok_or("tenant cookie not written")?;

        assert_eq!(cookie.value(), tenant.to_string());
        assert_eq!(res.take_string().await?, format!("{tenant}:2"));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_member_header_tenant_falls_back_and_echoes_choice() -> TestResult {
        let user = UserUuid::new();
        let declared = TenantUuid::new();
        let fallback = TenantUuid::new();

        let mut memberships = MockMembershipsService::new();

        memberships
            .expect_find_role()
            .once()
            .with(eq(declared), eq(user))
            .return_once(|_, _| Err(MembershipsServiceError::NotFound));

        memberships
            .expect_find_any_membership()
            .once()
            .return_once(move |user| {
                Ok(MembershipRecord {
                    tenant: fallback,
                    user,
                    role: RoleId::new(1),
                })
            });

        let mut res = TestClient::get("http://example.com")
            .add_header(CLIENT_TYPE_HEADER, "mobile", true)
            .add_header(ACTIVE_TENANT_HEADER, declared.to_string(), true)
            .send(&make_service(user, existing_tenants(), memberships))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let echoed = res
            .headers()
            .get(ACTIVE_TENANT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(echoed, Some(fallback.to_string()));
        assert!(response_cookie(&res, TENANT_COOKIE).is_none());
        assert_eq!(res.take_string().await?, format!("{fallback}:1"));

        Ok(())
    }

    #[tokio::test]
    async fn test_user_without_memberships_returns_403() -> TestResult {
        let mut memberships = MockMembershipsService::new();

        memberships.expect_find_role().never();
        memberships
            .expect_find_any_membership()
            .once()
            .return_once(|_| Err(MembershipsServiceError::NotFound));

        let mut tenants = MockTenantsService::new();

        tenants.expect_get_tenant().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(UserUuid::new(), tenants, memberships))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_membership_deadline_returns_503() -> TestResult {
        let mut memberships = MockMembershipsService::new();

        memberships.expect_find_any_membership().once().return_once(|_| {
            Err(MembershipsServiceError::DeadlineExceeded(Duration::from_millis(5)))
        });

        let mut tenants = MockTenantsService::new();

        tenants.expect_get_tenant().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(UserUuid::new(), tenants, memberships))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_identity_returns_401() -> TestResult {
        let mut memberships = MockMembershipsService::new();

        memberships.expect_find_role().never();
        memberships.expect_find_any_membership().never();

        let res = TestClient::get("http://example.com")
            .send(&service(
                state_with_tenancy(MockTenantsService::new(), memberships),
                Router::new().hoop(handler).push(Router::new().get(echo_tenant)),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
