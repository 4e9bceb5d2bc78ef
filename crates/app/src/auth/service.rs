//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{AuthServiceError, Caller, TokenService, hash_password, verify_password},
    database::RepositoryError,
    domain::users::{
        UsersRepository,
        data::NewUser,
        records::{Role, UserRecord, UserUuid, normalize_email},
    },
};

/// Registration payload. Registration always yields an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A freshly issued token and the identity it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub caller: Caller,
}

/// Create an identity with an explicit role. This is the only path that can
/// produce administrators; registration always goes through it with
/// [`Role::Employee`].
///
/// # Errors
///
/// Returns an error when a field is blank, the email is taken, or storage fails.
pub async fn provision_user(
    users: &dyn UsersRepository,
    registration: Registration,
    role: Role,
) -> Result<UserRecord, AuthServiceError> {
    let name = registration.name.trim();
    let email = normalize_email(&registration.email);

    if name.is_empty() {
        return Err(AuthServiceError::InvalidData("name must not be blank"));
    }

    if email.is_empty() {
        return Err(AuthServiceError::InvalidData("email must not be blank"));
    }

    if registration.password.is_empty() {
        return Err(AuthServiceError::InvalidData("password must not be blank"));
    }

    let password_hash = hash_password(&registration.password)?;

    let user = users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: name.to_string(),
            email,
            password_hash,
            role,
        })
        .await
        .map_err(|error| match error {
            RepositoryError::AlreadyExists => AuthServiceError::EmailTaken,
            error => AuthServiceError::Repository(error),
        })?;

    info!(user = %user.uuid, role = %user.role, "created user");

    Ok(user)
}

#[derive(Clone)]
pub struct DefaultAuthService {
    users: Arc<dyn UsersRepository>,
    tokens: Arc<dyn TokenService>,
}

impl DefaultAuthService {
    #[must_use]
    pub fn new(users: Arc<dyn UsersRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Create an identity with an explicit role. See [`provision_user`].
    ///
    /// # Errors
    ///
    /// Returns an error when a field is blank, the email is taken, or storage fails.
    pub async fn create_user(
        &self,
        registration: Registration,
        role: Role,
    ) -> Result<UserRecord, AuthServiceError> {
        provision_user(&*self.users, registration, role).await
    }

    fn session(&self, user: UserRecord) -> Result<Session, AuthServiceError> {
        let token = self.tokens.issue(&user.email)?;

        Ok(Session {
            token,
            caller: Caller::from(user),
        })
    }
}

impl std::fmt::Debug for DefaultAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAuthService").finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for DefaultAuthService {
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError> {
        let user = self.create_user(registration, Role::Employee).await?;

        self.session(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError> {
        let user = self
            .users
            .find_by_email(&normalize_email(&credentials.email))
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &user.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.session(user)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError> {
        let claims = self.tokens.verify(bearer_token)?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or(AuthServiceError::UnknownIdentity)?;

        Ok(Caller::from(user))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new employee and sign them in.
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError>;

    /// Exchange credentials for a token. Unknown emails and wrong passwords are
    /// indistinguishable.
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError>;

    /// Verify a bearer token and resolve the identity it names.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError>;
}
