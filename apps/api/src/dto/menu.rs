use maintdesk_application::ResolvedFlags;
use maintdesk_domain::MenuNode;
use serde::Serialize;
use ts_rs::TS;

/// API representation of one visible menu entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/menu-node-response.ts"
)]
pub struct MenuNodeResponse {
    pub id: i64,
    pub label: String,
    pub path: Option<String>,
    pub children: Vec<MenuNodeResponse>,
    pub can_read: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl From<MenuNode> for MenuNodeResponse {
    fn from(node: MenuNode) -> Self {
        Self {
            id: node.id,
            label: node.label,
            path: node.path,
            children: node.children.into_iter().map(Self::from).collect(),
            can_read: node.can_read,
            can_create: node.can_create,
            can_update: node.can_update,
            can_delete: node.can_delete,
        }
    }
}

/// Visible menu tree with the snapshot-loaded signal.
///
/// `loaded: false` means "still loading", not "no access"; the UI keeps its
/// skeleton state instead of hiding everything.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/visible-menu-response.ts"
)]
pub struct VisibleMenuResponse {
    pub loaded: bool,
    pub items: Vec<MenuNodeResponse>,
}

/// Action flags resolved for one path.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/menu-flags-response.ts"
)]
pub struct MenuFlagsResponse {
    pub loaded: bool,
    pub can_read: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl From<ResolvedFlags> for MenuFlagsResponse {
    fn from(flags: ResolvedFlags) -> Self {
        Self {
            loaded: flags.loaded,
            can_read: flags.can_read,
            can_create: flags.can_create,
            can_update: flags.can_update,
            can_delete: flags.can_delete,
        }
    }
}

/// Ancestor labels to pre-expand for the active path.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/open-ancestor-chain-response.ts"
)]
pub struct OpenAncestorChainResponse {
    pub labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use maintdesk_domain::MenuNode;

    use super::MenuNodeResponse;

    #[test]
    fn conversion_keeps_nested_structure() {
        let node = MenuNode::group(
            1,
            "Fleet",
            vec![MenuNode::screen(2, "Equipment", "/fleet/equipment")
                .with_flags(true, false, true, false)],
        );

        let response = MenuNodeResponse::from(node);
        assert_eq!(response.label, "Fleet");
        assert_eq!(response.children.len(), 1);
        assert_eq!(
            response.children[0].path.as_deref(),
            Some("/fleet/equipment")
        );
        assert!(response.children[0].can_update);
        assert!(!response.children[0].can_delete);
    }
}
