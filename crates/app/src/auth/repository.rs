//! Auth Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::Credentials,
    domain::users::records::{UserRecord, UserUuid},
};

const GET_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/get_credentials_by_email.sql");
const GET_CREDENTIALS_SQL: &str = include_str!("sql/get_credentials.sql");
const UPDATE_PASSWORD_SQL: &str = include_str!("sql/update_password.sql");
const RESET_ADMIN_SQL: &str = include_str!("sql/reset_admin.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<Credentials>, sqlx::Error> {
        query_as::<Postgres, Credentials>(GET_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_credentials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Credentials, sqlx::Error> {
        query_as::<Postgres, Credentials>(GET_CREDENTIALS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_password(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_PASSWORD_SQL)
            .bind(user.into_uuid())
            .bind(password_hash)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Promote an existing account to an active admin with a new password.
    pub(crate) async fn reset_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(RESET_ADMIN_SQL)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Credentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            password_hash: row.try_get("password_hash")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
