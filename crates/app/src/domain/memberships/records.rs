//! Membership Records

use std::fmt;

use serde::Serialize;

use crate::domain::{tenants::records::TenantUuid, users::records::UserUuid};

/// Role a user holds inside a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoleId(i16);

impl RoleId {
    #[must_use]
    pub const fn new(id: i16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// "user X has role R in tenant T"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipRecord {
    pub tenant: TenantUuid,
    pub user: UserUuid,
    pub role: RoleId,
}
