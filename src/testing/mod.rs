// Test doubles shared by unit tests.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use crate::identity::{IdentityError, IdentityProvider, UserInfo};
use crate::state::AppState;

/// The one token the mock provider resolves.
pub const TEST_SESSION_TOKEN: &str = "test-session-token";

pub fn test_user() -> UserInfo {
    UserInfo {
        id: "user-1".to_string(),
        email: "ana@example.com".to_string(),
        name: Some("Ana".to_string()),
        picture: None,
    }
}

/// In-memory identity provider: resolves `TEST_SESSION_TOKEN` to the
/// configured user, everything else to no session.
pub struct MockIdentity {
    user: Option<UserInfo>,
}

impl MockIdentity {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn logged_in() -> Self {
        Self {
            user: Some(test_user()),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn oauth_redirect_url(&self, provider: &str) -> Result<String, IdentityError> {
        Ok(format!("https://accounts.example.com/oauth/{}", provider))
    }

    async fn exchange_code(&self, code: &str) -> Result<String, IdentityError> {
        Ok(format!("token-for-{}", code))
    }

    async fn resolve_session(&self, token: &str) -> Result<Option<UserInfo>, IdentityError> {
        if token == TEST_SESSION_TOKEN {
            Ok(self.user.clone())
        } else {
            Ok(None)
        }
    }

    async fn invalidate_session(&self, _token: &str) -> Result<(), IdentityError> {
        Ok(())
    }
}

/// App state with a lazy (never-connected) pool. Suitable for exercising
/// routing, validation, and the auth layers; anything that reaches the store
/// needs a real database instead.
pub fn test_state(identity: MockIdentity) -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost/fibra_test")
        .expect("lazy test pool");
    AppState::new(pool, Arc::new(identity))
}
