//! Users Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::{RepositoryError, try_get_parsed},
    domain::users::{
        data::NewUser,
        records::{Role, UserRecord, UserUuid},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const FIND_USER_BY_UUID_SQL: &str = include_str!("sql/find_user_by_uuid.sql");
const LIST_USERS_BY_ROLE_SQL: &str = include_str!("sql/list_users_by_role.sql");

#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Persist a new identity. A taken email surfaces as
    /// [`RepositoryError::AlreadyExists`].
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, RepositoryError>;

    /// Look up an identity by its normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;

    async fn find_by_uuid(&self, user: UserUuid) -> Result<Option<UserRecord>, RepositoryError>;

    /// All identities holding `role`, oldest first.
    async fn find_by_role(&self, role: Role) -> Result<Vec<UserRecord>, RepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, RepositoryError> {
        let created = query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let user = query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_uuid(&self, user: UserUuid) -> Result<Option<UserRecord>, RepositoryError> {
        let user = query_as::<Postgres, UserRecord>(FIND_USER_BY_UUID_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<UserRecord>, RepositoryError> {
        let users = query_as::<Postgres, UserRecord>(LIST_USERS_BY_ROLE_SQL)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: try_get_parsed(row, "role")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
