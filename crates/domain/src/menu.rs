use std::str::FromStr;

use maintdesk_core::AppError;
use serde::{Deserialize, Serialize};

/// One entry in the per-user navigation/permission tree.
///
/// Trees arrive fully materialized from the menu service and are never
/// mutated afterwards. Wire payloads may omit `path`, `children` and any of
/// the flags; absent values decode to "no path", "no children" and "denied"
/// so a sparse or partially corrupted entry can never widen access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Identifier unique within the tree.
    pub id: i64,
    /// Display name; also the dropdown open/close identity key in the UI.
    pub label: String,
    /// Route for directly navigable nodes; absent on pure group nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Ordered child entries; empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
    /// Read access for the node's screen.
    #[serde(default)]
    pub can_read: bool,
    /// Create access for the node's screen.
    #[serde(default)]
    pub can_create: bool,
    /// Update access for the node's screen.
    #[serde(default)]
    pub can_update: bool,
    /// Delete access for the node's screen.
    #[serde(default)]
    pub can_delete: bool,
}

impl MenuNode {
    /// Creates a pure group node with no path of its own.
    #[must_use]
    pub fn group(id: i64, label: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            id,
            label: label.into(),
            path: None,
            children,
            can_read: false,
            can_create: false,
            can_update: false,
            can_delete: false,
        }
    }

    /// Creates a navigable leaf with all flags denied.
    #[must_use]
    pub fn screen(id: i64, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            path: Some(path.into()),
            children: Vec::new(),
            can_read: false,
            can_create: false,
            can_update: false,
            can_delete: false,
        }
    }

    /// Replaces the action flags, in read/create/update/delete order.
    #[must_use]
    pub fn with_flags(
        mut self,
        can_read: bool,
        can_create: bool,
        can_update: bool,
        can_delete: bool,
    ) -> Self {
        self.can_read = can_read;
        self.can_create = can_create;
        self.can_update = can_update;
        self.can_delete = can_delete;
        self
    }

    /// Marks the node as navigable; a node may carry both a path and children.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the flag for one action kind; flags are independent.
    #[must_use]
    pub fn flag(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::Read => self.can_read,
            PermissionKind::Create => self.can_create,
            PermissionKind::Update => self.can_update,
            PermissionKind::Delete => self.can_delete,
        }
    }
}

/// Action kind gated per screen by the permission tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    /// List/detail access.
    Read,
    /// Add-form access.
    Create,
    /// Edit-form access.
    Update,
    /// Delete-confirmation access.
    Delete,
}

impl PermissionKind {
    /// Returns a stable transport value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns all known permission kinds.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionKind] = &[
            PermissionKind::Read,
            PermissionKind::Create,
            PermissionKind::Update,
            PermissionKind::Delete,
        ];

        ALL
    }
}

impl FromStr for PermissionKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown permission kind '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{MenuNode, PermissionKind};

    #[test]
    fn sparse_wire_payload_decodes_to_denied_leaf() {
        let node: MenuNode = serde_json::from_str(r#"{"id": 4, "label": "Fuel"}"#)
            .unwrap_or_else(|_| MenuNode::group(0, "", Vec::new()));

        assert_eq!(node.id, 4);
        assert!(node.path.is_none());
        assert!(node.children.is_empty());
        for kind in PermissionKind::all() {
            assert!(!node.flag(*kind));
        }
    }

    #[test]
    fn nested_wire_payload_keeps_child_order() {
        let payload = r#"{
            "id": 1,
            "label": "Fleet",
            "children": [
                {"id": 2, "label": "Equipment", "path": "/fleet/equipment", "can_read": true},
                {"id": 3, "label": "Categories", "path": "/fleet/categories"}
            ]
        }"#;
        let node: MenuNode =
            serde_json::from_str(payload).unwrap_or_else(|_| MenuNode::group(0, "", Vec::new()));

        let labels: Vec<&str> = node
            .children
            .iter()
            .map(|child| child.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Equipment", "Categories"]);
        assert!(node.children[0].can_read);
        assert!(!node.children[1].can_read);
    }

    #[test]
    fn flag_maps_each_kind_independently() {
        let node = MenuNode::screen(9, "Backlog", "/maintenance/backlog")
            .with_flags(true, false, true, false);

        assert!(node.flag(PermissionKind::Read));
        assert!(!node.flag(PermissionKind::Create));
        assert!(node.flag(PermissionKind::Update));
        assert!(!node.flag(PermissionKind::Delete));
    }

    #[test]
    fn permission_kind_parses_transport_values() {
        for kind in PermissionKind::all() {
            assert_eq!(PermissionKind::from_str(kind.as_str()).ok(), Some(*kind));
        }
    }

    #[test]
    fn permission_kind_rejects_unknown_value() {
        assert!(PermissionKind::from_str("approve").is_err());
    }
}
