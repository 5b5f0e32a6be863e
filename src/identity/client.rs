use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::{IdentityError, IdentityProvider, UserInfo};
use crate::config::IdentityConfig;

/// HTTP client for the external users service.
///
/// All calls carry the service API key; session-scoped calls additionally
/// carry the session token as a bearer credential. Requests use a bounded
/// timeout so a stalled provider surfaces as an error instead of hanging.
pub struct UsersServiceClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RedirectUrlBody {
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct SessionTokenBody {
    session_token: String,
}

impl UsersServiceClient {
    pub fn from_config(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        // Url::join treats a path without a trailing slash as a file,
        // dropping the last segment.
        let mut api_url = config.api_url.clone();
        if !api_url.ends_with('/') {
            api_url.push('/');
        }
        let base_url =
            Url::parse(&api_url).map_err(|_| IdentityError::Config("invalid users service URL"))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityError> {
        self.base_url
            .join(path)
            .map_err(|_| IdentityError::Config("invalid users service endpoint path"))
    }
}

#[async_trait]
impl IdentityProvider for UsersServiceClient {
    async fn oauth_redirect_url(&self, provider: &str) -> Result<String, IdentityError> {
        let url = self.endpoint(&format!("oauth/{}/redirect_url", provider))?;
        let response = self
            .http
            .get(url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::Upstream(response.status().as_u16()));
        }

        let body: RedirectUrlBody = response.json().await?;
        Ok(body.redirect_url)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, IdentityError> {
        let url = self.endpoint("sessions")?;
        let response = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::Upstream(response.status().as_u16()));
        }

        let body: SessionTokenBody = response.json().await?;
        Ok(body.session_token)
    }

    async fn resolve_session(&self, token: &str) -> Result<Option<UserInfo>, IdentityError> {
        let url = self.endpoint("users/me")?;
        let response = self
            .http
            .get(url)
            .header("x-api-key", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let user: UserInfo = response.json().await?;
                Ok(Some(user))
            }
            status => Err(IdentityError::Upstream(status.as_u16())),
        }
    }

    async fn invalidate_session(&self, token: &str) -> Result<(), IdentityError> {
        let url = self.endpoint("sessions/current")?;
        let response = self
            .http
            .delete(url)
            .header("x-api-key", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        // An already-expired token is as logged out as it gets.
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            status => Err(IdentityError::Upstream(status.as_u16())),
        }
    }
}
