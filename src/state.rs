use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::manager;
use crate::identity::{IdentityProvider, UsersServiceClient};

/// Shared per-request dependencies: the connection pool and the external
/// identity provider. Everything else is stateless.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(pool: PgPool, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { pool, identity }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = manager::connect(&config.database)?;
        let identity = UsersServiceClient::from_config(&config.identity)?;
        Ok(Self::new(pool, Arc::new(identity)))
    }
}
