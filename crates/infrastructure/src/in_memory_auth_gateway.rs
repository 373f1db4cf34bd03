use std::collections::HashMap;

use async_trait::async_trait;
use maintdesk_application::{AuthGateway, AuthenticatedUser};
use maintdesk_core::{AccessToken, AppError, AppResult, UserIdentity};
use tokio::sync::RwLock;
use uuid::Uuid;

struct RegisteredUser {
    password: String,
    identity: UserIdentity,
}

/// In-memory authentication gateway for tests and seeded local runs.
///
/// Plain-text password comparison; never wire this into a deployment.
#[derive(Default)]
pub struct InMemoryAuthGateway {
    users: RwLock<HashMap<String, RegisteredUser>>,
}

impl InMemoryAuthGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a user; a repeated username replaces the earlier entry.
    pub async fn register_user(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        identity: UserIdentity,
    ) {
        self.users.write().await.insert(
            username.into(),
            RegisteredUser {
                password: password.into(),
                identity,
            },
        );
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
    async fn login(&self, username: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let users = self.users.read().await;
        let user = users
            .get(username)
            .filter(|user| user.password == password)
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_owned()))?;

        Ok(AuthenticatedUser {
            identity: user.identity.clone(),
            token: AccessToken::new(Uuid::new_v4().to_string())?,
        })
    }
}
