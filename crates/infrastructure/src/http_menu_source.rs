use std::time::Duration;

use async_trait::async_trait;
use maintdesk_application::MenuSource;
use maintdesk_core::{AccessToken, AppError, AppResult, UserIdentity};
use maintdesk_domain::MenuNode;
use tracing::warn;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Menu tree fetch adapter for the remote menu service.
///
/// The service answers with the tree already filtered and decorated with
/// permission flags for the requesting user; this adapter only moves bytes
/// and leaves tolerant decoding to the domain wire model.
pub struct HttpMenuSource {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpMenuSource {
    /// Creates a source against the given service base URL.
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build menu service client: {error}"))
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    async fn fetch_menu(
        &self,
        identity: &UserIdentity,
        token: &AccessToken,
    ) -> AppResult<Vec<MenuNode>> {
        let response = self
            .http_client
            .get(format!(
                "{}/menus/by-user/{}",
                self.base_url,
                identity.subject()
            ))
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|error| {
                warn!(subject = identity.subject(), %error, "menu service request failed");
                AppError::Internal("menu service is unreachable".to_owned())
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized(
                "menu service rejected the session token".to_owned(),
            ));
        }
        if !status.is_success() {
            warn!(subject = identity.subject(), %status, "menu service returned unexpected status");
            return Err(AppError::Internal(format!(
                "menu service answered with status {status}"
            )));
        }

        response.json::<Vec<MenuNode>>().await.map_err(|error| {
            warn!(subject = identity.subject(), %error, "menu service returned malformed payload");
            AppError::Internal("menu service returned a malformed payload".to_owned())
        })
    }
}
