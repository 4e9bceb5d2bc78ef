//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, DefaultAuthService, JwtTokenService, SigningKey, TokenError},
    clock::{Clock, SystemClock},
    database::{self, PoolSettings},
    domain::{
        audit::{AuditService, DefaultAuditService, PgAuditRepository},
        dashboard::{DashboardService, DefaultDashboardService},
        notifications::{DefaultNotificationsService, NotificationsService, PgNotificationsRepository},
        users::PgUsersRepository,
        workflows::{
            DefaultWorkflowsService, PgWorkflowEventsRepository, PgWorkflowsRepository,
            WorkflowSideEffects, WorkflowsService,
        },
    },
    mail::{HttpMailConfig, HttpMailTransport, LogMailTransport, MailTransport, TransportError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),

    #[error("invalid token settings")]
    Token(#[source] TokenError),

    #[error("failed to build mail transport")]
    Mail(#[source] TransportError),
}

/// Settings needed to wire the application services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub pool: PoolSettings,
    pub signing_key: SigningKey,
    pub token_lifetime: SignedDuration,

    /// When `None`, outbound mail is logged instead of sent.
    pub mail: Option<HttpMailConfig>,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub workflows: Arc<dyn WorkflowsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub audit: Arc<dyn AuditService>,
    pub dashboard: Arc<dyn DashboardService>,
}

impl AppContext {
    /// Connect to the database, apply migrations, and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails, or when the token
    /// settings are invalid.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect_with(&config.database_url, config.pool)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let tokens = JwtTokenService::new(config.signing_key, config.token_lifetime, clock.clone())
            .map_err(AppInitError::Token)?;

        let mail: Arc<dyn MailTransport> = match config.mail {
            Some(mail) => {
                info!(
                    url = %mail.url,
                    timeout_ms = mail.timeout.as_millis(),
                    "sending workflow mail through relay"
                );
                Arc::new(HttpMailTransport::new(mail).map_err(AppInitError::Mail)?)
            }
            None => {
                info!("no mail relay configured; workflow mail will be logged");
                Arc::new(LogMailTransport)
            }
        };

        let users = Arc::new(PgUsersRepository::new(pool.clone()));
        let workflows = Arc::new(PgWorkflowsRepository::new(pool.clone()));

        let audit = Arc::new(DefaultAuditService::new(
            Arc::new(PgAuditRepository::new(pool.clone())),
            clock.clone(),
        ));

        let notifications = Arc::new(DefaultNotificationsService::new(
            Arc::new(PgNotificationsRepository::new(pool.clone())),
            clock.clone(),
        ));

        let effects = WorkflowSideEffects {
            events: Arc::new(PgWorkflowEventsRepository::new(pool)),
            audit: audit.clone(),
            notifications: notifications.clone(),
            mail,
        };

        Ok(Self {
            auth: Arc::new(DefaultAuthService::new(users.clone(), Arc::new(tokens))),
            workflows: Arc::new(DefaultWorkflowsService::new(
                workflows.clone(),
                users,
                effects,
                clock,
            )),
            dashboard: Arc::new(DefaultDashboardService::new(workflows)),
            notifications,
            audit,
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
