use std::time::Duration;

use async_trait::async_trait;
use maintdesk_application::{AuthGateway, AuthenticatedUser};
use maintdesk_core::{AccessToken, AppError, AppResult, UserIdentity};
use serde::{Deserialize, Serialize};
use tracing::warn;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Login adapter for the remote authentication API.
pub struct HttpAuthGateway {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct LoginRequestPayload<'credentials> {
    username: &'credentials str,
    password: &'credentials str,
}

#[derive(Debug, Deserialize)]
struct LoginResponsePayload {
    subject: String,
    display_name: String,
    #[serde(default)]
    email: Option<String>,
    token: String,
}

impl HttpAuthGateway {
    /// Creates a gateway against the given service base URL.
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build auth service client: {error}"))
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, username: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let response = self
            .http_client
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequestPayload { username, password })
            .send()
            .await
            .map_err(|error| {
                warn!(%error, "auth service request failed");
                AppError::Internal("authentication service is unreachable".to_owned())
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized("invalid credentials".to_owned()));
        }
        if !status.is_success() {
            warn!(%status, "auth service returned unexpected status");
            return Err(AppError::Internal(format!(
                "authentication service answered with status {status}"
            )));
        }

        let payload: LoginResponsePayload = response.json().await.map_err(|error| {
            warn!(%error, "auth service returned malformed payload");
            AppError::Internal("authentication service returned a malformed payload".to_owned())
        })?;

        Ok(AuthenticatedUser {
            identity: UserIdentity::new(payload.subject, payload.display_name, payload.email),
            token: AccessToken::new(payload.token)?,
        })
    }
}
