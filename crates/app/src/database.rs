//! Database connection management

use std::{error::Error as StdError, str::FromStr, time::Duration};

use sqlx::{
    Error, PgPool, Row,
    error::{DatabaseError, ErrorKind},
    migrate::MigrateError,
    postgres::{PgPoolOptions, PgRow},
};
use thiserror::Error;

/// Repository error variants shared by every persistence collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A row with the same unique key already exists.
    #[error("record already exists")]
    AlreadyExists,

    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,

    /// Referenced related row does not exist.
    #[error("related record not found")]
    InvalidReference,

    /// Required data was missing.
    #[error("missing required data")]
    MissingRequiredData,

    /// Provided data failed validation.
    #[error("invalid data")]
    InvalidData,

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Connection pool limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,

    /// How long a request waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Connect to `PostgreSQL` with default pool limits.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, Error> {
    connect_with(database_url, PoolSettings::default()).await
}

/// Connect to `PostgreSQL` with explicit pool limits.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(database_url: &str, pool: PoolSettings) -> Result<PgPool, Error> {
    PgPoolOptions::new()
        .max_connections(pool.max_connections)
        .acquire_timeout(pool.acquire_timeout)
        .connect(database_url)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Read a TEXT column and parse it into `T`, reporting parse failures as
/// column decode errors.
pub(crate) fn try_get_parsed<T>(row: &PgRow, column: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    row.try_get::<String, _>(column)?
        .parse::<T>()
        .map_err(|e| Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}
