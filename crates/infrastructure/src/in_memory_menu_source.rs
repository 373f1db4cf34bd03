use std::collections::HashMap;

use async_trait::async_trait;
use maintdesk_application::MenuSource;
use maintdesk_core::{AccessToken, AppResult, UserIdentity};
use maintdesk_domain::MenuNode;
use tokio::sync::RwLock;

/// In-memory menu source for tests and seeded local runs.
#[derive(Default)]
pub struct InMemoryMenuSource {
    shared: RwLock<Option<Vec<MenuNode>>>,
    per_subject: RwLock<HashMap<String, Vec<MenuNode>>>,
}

impl InMemoryMenuSource {
    /// Creates an empty source; every fetch answers with no visible menu.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: RwLock::new(None),
            per_subject: RwLock::new(HashMap::new()),
        }
    }

    /// Sets the tree served to subjects without an explicit entry.
    pub async fn set_shared_menu(&self, tree: Vec<MenuNode>) {
        *self.shared.write().await = Some(tree);
    }

    /// Sets the tree served to one subject, overriding the shared tree.
    pub async fn set_menu(&self, subject: impl Into<String>, tree: Vec<MenuNode>) {
        self.per_subject.write().await.insert(subject.into(), tree);
    }
}

#[async_trait]
impl MenuSource for InMemoryMenuSource {
    async fn fetch_menu(
        &self,
        identity: &UserIdentity,
        _token: &AccessToken,
    ) -> AppResult<Vec<MenuNode>> {
        if let Some(tree) = self.per_subject.read().await.get(identity.subject()) {
            return Ok(tree.clone());
        }

        Ok(self.shared.read().await.clone().unwrap_or_default())
    }
}
