// External users-service integration.
//
// Sessions are owned entirely by the external provider: this service only
// exchanges OAuth codes for opaque session tokens, resolves tokens to user
// identities, and invalidates tokens on logout.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::UsersServiceClient;

/// Cookie carrying the opaque session token issued by the users service.
pub const SESSION_COOKIE_NAME: &str = "fibra_session_token";

/// 60 days, matching the session lifetime of the users service.
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 24 * 60 * 60;

/// Identity resolved from a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("users service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("users service returned status {0}")]
    Upstream(u16),

    #[error("identity configuration error: {0}")]
    Config(&'static str),
}

/// Collaborator interface to the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// OAuth redirect URL for the given provider (e.g. "google").
    async fn oauth_redirect_url(&self, provider: &str) -> Result<String, IdentityError>;

    /// Exchange an OAuth authorization code for a session token.
    async fn exchange_code(&self, code: &str) -> Result<String, IdentityError>;

    /// Resolve a session token to its user, or None for an invalid/expired token.
    async fn resolve_session(&self, token: &str) -> Result<Option<UserInfo>, IdentityError>;

    /// Invalidate a session token.
    async fn invalidate_session(&self, token: &str) -> Result<(), IdentityError>;
}

/// Set-Cookie value installing the session token.
///
/// httpOnly + Secure + SameSite=None: the cookie must survive cross-site
/// requests from the public frontend while staying out of script reach.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; Secure; SameSite=None",
        SESSION_COOKIE_NAME, token, SESSION_MAX_AGE_SECS
    )
}

/// Set-Cookie value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; Secure; SameSite=None",
        SESSION_COOKIE_NAME
    )
}
