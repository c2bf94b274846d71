//! Memberships Repository

use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{Db, QueryError},
    domain::{
        memberships::records::{MembershipRecord, RoleId},
        tenants::records::TenantUuid,
        users::records::UserUuid,
    },
};

const FIND_ROLE_SQL: &str = include_str!("sql/find_role.sql");
const FIND_ANY_MEMBERSHIP_SQL: &str = include_str!("sql/find_any_membership.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgMembershipsRepository {
    db: Db,
}

impl PgMembershipsRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }

    pub(crate) async fn find_role(
        &self,
        tenant: TenantUuid,
        user: UserUuid,
    ) -> Result<RoleId, QueryError> {
        self.db
            .bounded(
                query_scalar::<Postgres, i16>(FIND_ROLE_SQL)
                    .bind(tenant.into_uuid())
                    .bind(user.into_uuid())
                    .fetch_one(self.db.pool()),
            )
            .await
            .map(RoleId::new)
    }

    pub(crate) async fn find_any_membership(
        &self,
        user: UserUuid,
    ) -> Result<MembershipRecord, QueryError> {
        self.db
            .bounded(
                query_as::<Postgres, MembershipRecord>(FIND_ANY_MEMBERSHIP_SQL)
                    .bind(user.into_uuid())
                    .fetch_one(self.db.pool()),
            )
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for MembershipRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            tenant: TenantUuid::from_uuid(row.try_get("restaurant_id")?),
            user: UserUuid::from_uuid(row.try_get("user_id")?),
            role: RoleId::new(row.try_get("role_id")?),
        })
    }
}
