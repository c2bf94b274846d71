//! Users Repository

use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::{Db, QueryError},
    domain::users::records::{NewUser, UserCredentials, UserRecord, UserUuid},
};

const FIND_CREDENTIALS_SQL: &str = include_str!("sql/find_credentials.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const MARK_EMAIL_VERIFIED_SQL: &str = include_str!("sql/mark_email_verified.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    db: Db,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }

    pub(crate) async fn find_credentials(&self, email: &str) -> Result<UserCredentials, QueryError> {
        self.db
            .bounded(
                query_as::<Postgres, UserCredentials>(FIND_CREDENTIALS_SQL)
                    .bind(email)
                    .fetch_one(self.db.pool()),
            )
            .await
    }

    pub(crate) async fn create_user(&self, user: NewUser) -> Result<UserRecord, QueryError> {
        self.db
            .bounded(
                query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
                    .bind(user.uuid.into_uuid())
                    .bind(user.name)
                    .bind(user.email)
                    .bind(user.password_hash)
                    .fetch_one(self.db.pool()),
            )
            .await
    }

    pub(crate) async fn mark_email_verified(&self, user: UserUuid) -> Result<(), QueryError> {
        let result = self
            .db
            .bounded(
                query(MARK_EMAIL_VERIFIED_SQL)
                    .bind(user.into_uuid())
                    .execute(self.db.pool()),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(QueryError::Sql(sqlx::Error::RowNotFound));
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("id")?),
            password_hash: row.try_get("password")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            email_verified: row.try_get("is_email_verified")?,
        })
    }
}
