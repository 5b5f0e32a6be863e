use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::database::models::AdminUser;
use crate::identity::{IdentityError, IdentityProvider, UserInfo};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("identity provider error: {0}")]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("user not found or email mismatch")]
    EmailMismatch,
}

/// Registry of identities allowed to mutate street and suggestion state.
pub struct AdminService {
    pool: PgPool,
    identity: Arc<dyn IdentityProvider>,
}

impl AdminService {
    pub fn new(pool: PgPool, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { pool, identity }
    }

    /// Membership check used by the authorization gate: an active row
    /// matching the external user id or email.
    pub async fn is_admin(&self, user: &UserInfo) -> Result<bool, AdminError> {
        let row = sqlx::query(
            "SELECT id FROM admin_users WHERE (user_id = $1 OR email = $2) AND is_active = TRUE",
        )
        .bind(&user.id)
        .bind(&user.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Register an admin by self-confirmation: the acting session is
    /// re-resolved against the identity provider and must carry exactly the
    /// requested email. Existing rows are reactivated rather than duplicated.
    pub async fn register(
        &self,
        session_token: &str,
        email: &str,
    ) -> Result<AdminUser, AdminError> {
        let user = self
            .identity
            .resolve_session(session_token)
            .await?
            .ok_or(AdminError::EmailMismatch)?;

        if user.email != email {
            return Err(AdminError::EmailMismatch);
        }

        let admin = self.upsert(&user.id, email).await?;
        tracing::info!(admin_id = admin.id, email = %admin.email, "admin user registered");
        Ok(admin)
    }

    /// Direct upsert, bypassing the session confirmation. Used by the CLI to
    /// bootstrap the first admin, which the HTTP surface cannot do.
    pub async fn bootstrap(&self, user_id: &str, email: &str) -> Result<AdminUser, AdminError> {
        let admin = self.upsert(user_id, email).await?;
        tracing::info!(admin_id = admin.id, email = %admin.email, "admin user bootstrapped");
        Ok(admin)
    }

    async fn upsert(&self, user_id: &str, email: &str) -> Result<AdminUser, sqlx::Error> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (user_id, email)
            VALUES ($1, $2)
            ON CONFLICT (user_id, email)
            DO UPDATE SET is_active = TRUE, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await
    }
}
