//! Memberships service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        memberships::{
            errors::MembershipsServiceError,
            records::{MembershipRecord, RoleId},
            repository::PgMembershipsRepository,
        },
        tenants::records::TenantUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgMembershipsService {
    repository: PgMembershipsRepository,
}

impl PgMembershipsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgMembershipsRepository::new(db),
        }
    }
}

#[async_trait]
impl MembershipsService for PgMembershipsService {
    async fn find_role(
        &self,
        tenant: TenantUuid,
        user: UserUuid,
    ) -> Result<RoleId, MembershipsServiceError> {
        self.repository
            .find_role(tenant, user)
            .await
            .map_err(Into::into)
    }

    async fn find_any_membership(
        &self,
        user: UserUuid,
    ) -> Result<MembershipRecord, MembershipsServiceError> {
        self.repository
            .find_any_membership(user)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Read-only membership lookups.
pub trait MembershipsService: Send + Sync {
    /// Role of `user` inside `tenant`, or `NotFound` when they are not a member.
    async fn find_role(
        &self,
        tenant: TenantUuid,
        user: UserUuid,
    ) -> Result<RoleId, MembershipsServiceError>;

    /// The user's oldest membership in a live tenant.
    async fn find_any_membership(
        &self,
        user: UserUuid,
    ) -> Result<MembershipRecord, MembershipsServiceError>;
}
