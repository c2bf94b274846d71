//! Request identity.

use std::fmt;

use maitre_app::{domain::users::records::UserUuid, tenancy::ActiveTenant};

/// The signed access token a request authenticated with.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct SessionToken(String);

impl SessionToken {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(**redacted**)")
    }
}

/// Who is calling, and in which tenant.
///
/// Built by the auth gate and replaced, never mutated, by the tenant resolver.
#[derive(Debug, Clone)]
pub(crate) struct RequestIdentity {
    user: UserUuid,
    token: SessionToken,
    tenant: Option<ActiveTenant>,
}

impl RequestIdentity {
    pub(crate) fn new(user: UserUuid, token: SessionToken) -> Self {
        Self {
            user,
            token,
            tenant: None,
        }
    }

    #[must_use]
    pub(crate) fn with_tenant(self, tenant: ActiveTenant) -> Self {
        Self {
            tenant: Some(tenant),
            ..self
        }
    }

    pub(crate) fn user(&self) -> UserUuid {
        self.user
    }

    pub(crate) fn token(&self) -> &SessionToken {
        &self.token
    }

    pub(crate) fn tenant(&self) -> Option<&ActiveTenant> {
        self.tenant.as_ref()
    }
}
