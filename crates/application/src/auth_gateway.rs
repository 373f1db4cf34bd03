use async_trait::async_trait;
use maintdesk_core::{AccessToken, AppResult, UserIdentity};

/// Result of a successful login against the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identity claims for the session.
    pub identity: UserIdentity,
    /// Bearer token forwarded to the menu service on fetch.
    pub token: AccessToken,
}

/// Port for the external authentication service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for an identity and a bearer token.
    ///
    /// Implementations map rejected credentials to
    /// [`maintdesk_core::AppError::Unauthorized`] and transport failures to
    /// [`maintdesk_core::AppError::Internal`].
    async fn login(&self, username: &str, password: &str) -> AppResult<AuthenticatedUser>;
}
