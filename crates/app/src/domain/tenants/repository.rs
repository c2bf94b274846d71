//! Tenants Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::{Db, QueryError},
    domain::tenants::records::{TenantRecord, TenantUuid},
};

const GET_TENANT_SQL: &str = include_str!("sql/get_tenant.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed tenants repository.
pub(crate) struct PgTenantsRepository {
    db: Db,
}

impl PgTenantsRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }

    pub(crate) async fn get_tenant(&self, tenant: TenantUuid) -> Result<TenantRecord, QueryError> {
        self.db
            .bounded(
                query_as::<Postgres, TenantRecord>(GET_TENANT_SQL)
                    .bind(tenant.into_uuid())
                    .fetch_one(self.db.pool()),
            )
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TenantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TenantUuid::from_uuid(row.try_get("id")?),
            name: row.try_get("name")?,
            alias: row.try_get("alias")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
