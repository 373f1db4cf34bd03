use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use maintdesk_core::{AccessToken, AppError, AppResult, UserIdentity};
use maintdesk_domain::{
    MenuNode, PermissionKind, filter_visible, find_open_ancestor_chain, resolve_flag,
};
use tokio::sync::RwLock;
use tracing::debug;

/// Port for the remote menu service.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetches the fully materialized menu tree scoped to one user.
    ///
    /// An empty tree is a valid answer: the user has no visible menu.
    async fn fetch_menu(
        &self,
        identity: &UserIdentity,
        token: &AccessToken,
    ) -> AppResult<Vec<MenuNode>>;
}

/// Menu snapshot lifecycle state for one subject.
///
/// `NotLoaded` is how callers tell "still loading / never fetched" from an
/// authoritative denial; the resolver itself cannot make that distinction.
#[derive(Debug, Clone)]
pub enum MenuState {
    /// No snapshot is held; denied answers are not authoritative yet.
    NotLoaded,
    /// Current snapshot; replaced wholesale on reload, never mutated.
    Loaded(Arc<Vec<MenuNode>>),
}

/// Flags resolved for one path together with the loaded signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFlags {
    /// Whether a snapshot was present when the flags were resolved.
    pub loaded: bool,
    /// Read access for the path.
    pub can_read: bool,
    /// Create access for the path.
    pub can_create: bool,
    /// Update access for the path.
    pub can_update: bool,
    /// Delete access for the path.
    pub can_delete: bool,
}

impl ResolvedFlags {
    fn denied(loaded: bool) -> Self {
        Self {
            loaded,
            can_read: false,
            can_create: false,
            can_update: false,
            can_delete: false,
        }
    }
}

/// Session-scoped menu permission service.
///
/// Holds one replace-only tree snapshot per subject, populated at login and
/// cleared at logout. Queries clone the current `Arc` out of the store and
/// run on that snapshot, so a concurrent reload never exposes a partially
/// updated tree.
#[derive(Clone)]
pub struct MenuSessionService {
    source: Arc<dyn MenuSource>,
    snapshots: Arc<RwLock<HashMap<String, Arc<Vec<MenuNode>>>>>,
}

impl MenuSessionService {
    /// Creates the service from a menu source implementation.
    #[must_use]
    pub fn new(source: Arc<dyn MenuSource>) -> Self {
        Self {
            source,
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetches the user's tree and replaces any previous snapshot.
    pub async fn load(&self, identity: &UserIdentity, token: &AccessToken) -> AppResult<()> {
        let tree = self.source.fetch_menu(identity, token).await?;
        debug!(
            subject = identity.subject(),
            roots = tree.len(),
            "menu snapshot replaced"
        );

        self.snapshots
            .write()
            .await
            .insert(identity.subject().to_owned(), Arc::new(tree));
        Ok(())
    }

    /// Discards the subject's snapshot at logout.
    pub async fn clear(&self, subject: &str) {
        self.snapshots.write().await.remove(subject);
    }

    /// Returns the current snapshot state for a subject.
    pub async fn snapshot(&self, subject: &str) -> MenuState {
        match self.snapshots.read().await.get(subject) {
            Some(tree) => MenuState::Loaded(Arc::clone(tree)),
            None => MenuState::NotLoaded,
        }
    }

    /// Returns whether the subject holds the flag for a path.
    ///
    /// Fails closed while no snapshot is loaded; call [`Self::snapshot`] or
    /// [`Self::flags`] when "loading" must be told apart from "denied".
    pub async fn can(&self, subject: &str, path: &str, kind: PermissionKind) -> bool {
        match self.snapshot(subject).await {
            MenuState::Loaded(tree) => resolve_flag(&tree, path, kind),
            MenuState::NotLoaded => false,
        }
    }

    /// Ensures the subject holds the flag for a path.
    ///
    /// A missing snapshot maps to `Unauthorized` and a present-but-denying
    /// snapshot to `Forbidden`, so callers can surface the two cases
    /// differently.
    pub async fn require(&self, subject: &str, path: &str, kind: PermissionKind) -> AppResult<()> {
        match self.snapshot(subject).await {
            MenuState::NotLoaded => Err(AppError::Unauthorized(
                "menu permissions are not loaded for this session".to_owned(),
            )),
            MenuState::Loaded(tree) => {
                if resolve_flag(&tree, path, kind) {
                    Ok(())
                } else {
                    Err(AppError::Forbidden(format!(
                        "subject '{subject}' is missing '{}' access for '{path}'",
                        kind.as_str()
                    )))
                }
            }
        }
    }

    /// Resolves all four flags for a path in one snapshot read.
    pub async fn flags(&self, subject: &str, path: &str) -> ResolvedFlags {
        match self.snapshot(subject).await {
            MenuState::NotLoaded => ResolvedFlags::denied(false),
            MenuState::Loaded(tree) => ResolvedFlags {
                loaded: true,
                can_read: resolve_flag(&tree, path, PermissionKind::Read),
                can_create: resolve_flag(&tree, path, PermissionKind::Create),
                can_update: resolve_flag(&tree, path, PermissionKind::Update),
                can_delete: resolve_flag(&tree, path, PermissionKind::Delete),
            },
        }
    }

    /// Returns the readable subtree for rendering, or `None` before load.
    pub async fn visible_menu(&self, subject: &str) -> Option<Vec<MenuNode>> {
        match self.snapshot(subject).await {
            MenuState::Loaded(tree) => Some(filter_visible(&tree)),
            MenuState::NotLoaded => None,
        }
    }

    /// Returns ancestor labels to pre-expand for the active path.
    pub async fn open_chain(&self, subject: &str, path: &str) -> Vec<String> {
        match self.snapshot(subject).await {
            MenuState::Loaded(tree) => find_open_ancestor_chain(&tree, path),
            MenuState::NotLoaded => Vec::new(),
        }
    }
}
