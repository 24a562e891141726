//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    pagination::count_from_sql,
    users::{
        data::{NewUser, ProfileUpdate, UsersFilter},
        records::{Role, UserRecord, UserUuid},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const GET_USER_ROLE_SQL: &str = include_str!("sql/get_user_role.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");
const TOGGLE_ACTIVE_SQL: &str = include_str!("sql/toggle_active.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.phone.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch and lock a user's role.
    pub(crate) async fn lock_user_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Role, sqlx::Error> {
        let role: String = query_scalar(GET_USER_ROLE_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        decode_role(&role)
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &ProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.phone.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "users.repository.list_users",
        skip(self, tx),
        fields(total = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &UsersFilter,
    ) -> Result<(Vec<UserRecord>, u64), sqlx::Error> {
        let role = filter.role.map(Role::as_str);

        let users = query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .bind(role)
            .bind(filter.is_active)
            .bind(filter.page.sql_limit())
            .bind(filter.page.sql_offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_USERS_SQL)
            .bind(role)
            .bind(filter.is_active)
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("total", total);

        Ok((users, count_from_sql(total)))
    }

    pub(crate) async fn toggle_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(TOGGLE_ACTIVE_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

pub(crate) fn decode_role(value: &str) -> Result<Role, sqlx::Error> {
    value.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
        index: "role".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: decode_role(row.try_get("role")?)?,
            phone: row.try_get("phone")?,
            is_active: row.try_get("is_active")?,
            is_email_verified: row.try_get("is_email_verified")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
