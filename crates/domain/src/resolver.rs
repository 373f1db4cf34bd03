//! Pure queries over the per-user menu permission tree.
//!
//! Every function here fails closed: an empty tree, an unknown path or a
//! sparse node always resolves to "denied", "hidden" or "no ancestors".
//! Nothing in this module performs I/O, mutates its input or returns an
//! error, so the queries are safe to call from rendering and request code.

use crate::{MenuNode, PermissionKind};

/// Resolves the flag of one action kind for a target path.
///
/// Traversal is depth-first pre-order with children visited in their given
/// order. The first node whose `path` equals `target_path` decides the
/// answer and stops the walk; flags on ancestors, siblings or descendants of
/// the match are irrelevant. Paths are compared by exact string equality —
/// callers normalize trailing slashes and case before calling. A path not
/// present anywhere in the tree resolves to `false`.
#[must_use]
pub fn resolve_flag(tree: &[MenuNode], target_path: &str, kind: PermissionKind) -> bool {
    find_by_path(tree, target_path).is_some_and(|node| node.flag(kind))
}

/// Produces a new tree containing only entries the user may see.
///
/// A childless node is kept only when its read flag is set. A node with
/// children is kept when its recursively filtered children are non-empty, or
/// when the node carries its own path — a navigable node is not hidden
/// merely because it also groups children. A pure group left with no visible
/// children is pruned. Order is preserved and the input is not touched.
#[must_use]
pub fn filter_visible(tree: &[MenuNode]) -> Vec<MenuNode> {
    tree.iter()
        .filter_map(|node| {
            if node.children.is_empty() {
                return node.can_read.then(|| node.clone());
            }

            let children = filter_visible(&node.children);
            if children.is_empty() && node.path.is_none() {
                return None;
            }

            let mut kept = node.clone();
            kept.children = children;
            Some(kept)
        })
        .collect()
}

/// Returns the ancestor labels, root first, of the node matching a path.
///
/// Used to auto-expand navigation groups so the active screen is revealed.
/// Match semantics are identical to [`resolve_flag`]: first pre-order match
/// wins. An unmatched path, or a match at root level, yields an empty list.
#[must_use]
pub fn find_open_ancestor_chain(tree: &[MenuNode], current_path: &str) -> Vec<String> {
    let mut chain = Vec::new();
    if descend_to_path(tree, current_path, &mut chain) {
        chain
    } else {
        Vec::new()
    }
}

fn find_by_path<'tree>(nodes: &'tree [MenuNode], target_path: &str) -> Option<&'tree MenuNode> {
    for node in nodes {
        if node.path.as_deref() == Some(target_path) {
            return Some(node);
        }

        if let Some(found) = find_by_path(&node.children, target_path) {
            return Some(found);
        }
    }

    None
}

fn descend_to_path(nodes: &[MenuNode], target_path: &str, chain: &mut Vec<String>) -> bool {
    for node in nodes {
        if node.path.as_deref() == Some(target_path) {
            return true;
        }

        chain.push(node.label.clone());
        if descend_to_path(&node.children, target_path, chain) {
            return true;
        }
        chain.pop();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::{filter_visible, find_open_ancestor_chain, resolve_flag};
    use crate::{MenuNode, PermissionKind};

    fn fleet_tree() -> Vec<MenuNode> {
        vec![
            MenuNode::screen(1, "Dashboard", "/dashboard").with_flags(true, false, false, false),
            MenuNode::group(
                2,
                "Fleet",
                vec![
                    MenuNode::screen(3, "Equipment", "/fleet/equipment")
                        .with_flags(true, true, true, false),
                    MenuNode::screen(4, "Categories", "/fleet/categories")
                        .with_flags(true, false, false, true),
                ],
            ),
            MenuNode::group(
                5,
                "Maintenance",
                vec![MenuNode::group(
                    6,
                    "Backlog",
                    vec![
                        MenuNode::screen(7, "Tickets", "/maintenance/backlog")
                            .with_flags(true, true, false, false),
                    ],
                )],
            ),
        ]
    }

    #[test]
    fn unknown_path_is_denied_for_every_kind() {
        let tree = fleet_tree();
        for kind in PermissionKind::all() {
            assert!(!resolve_flag(&tree, "/fuel/requests", *kind));
        }
    }

    #[test]
    fn empty_tree_is_denied() {
        assert!(!resolve_flag(&[], "/dashboard", PermissionKind::Read));
    }

    #[test]
    fn match_returns_own_flag_regardless_of_neighbours() {
        let tree = fleet_tree();

        assert!(resolve_flag(
            &tree,
            "/fleet/equipment",
            PermissionKind::Update
        ));
        assert!(!resolve_flag(
            &tree,
            "/fleet/equipment",
            PermissionKind::Delete
        ));
        assert!(resolve_flag(
            &tree,
            "/fleet/categories",
            PermissionKind::Delete
        ));
    }

    #[test]
    fn deeply_nested_match_is_found() {
        let tree = fleet_tree();
        assert!(resolve_flag(
            &tree,
            "/maintenance/backlog",
            PermissionKind::Create
        ));
        assert!(!resolve_flag(
            &tree,
            "/maintenance/backlog",
            PermissionKind::Update
        ));
    }

    #[test]
    fn unset_flags_resolve_to_false() {
        let tree = vec![MenuNode::screen(1, "Assets", "/assets")];
        for kind in PermissionKind::all() {
            assert!(!resolve_flag(&tree, "/assets", *kind));
        }
    }

    #[test]
    fn first_pre_order_match_wins_on_duplicate_paths() {
        let tree = vec![
            MenuNode::group(
                1,
                "A",
                vec![MenuNode::screen(2, "B", "/b").with_flags(false, false, true, false)],
            ),
            MenuNode::screen(3, "C", "/b").with_flags(true, true, false, true),
        ];

        assert!(resolve_flag(&tree, "/b", PermissionKind::Update));
        assert!(!resolve_flag(&tree, "/b", PermissionKind::Read));
        assert_eq!(find_open_ancestor_chain(&tree, "/b"), vec!["A"]);
    }

    #[test]
    fn node_is_matched_before_its_descendants() {
        let tree = vec![
            MenuNode::group(
                1,
                "Fuel",
                vec![MenuNode::screen(2, "Requests", "/fuel").with_flags(true, true, true, true)],
            )
            .with_path("/fuel")
            .with_flags(true, false, false, false),
        ];

        assert!(!resolve_flag(&tree, "/fuel", PermissionKind::Update));
    }

    #[test]
    fn filter_visible_on_empty_tree_is_empty() {
        assert!(filter_visible(&[]).is_empty());
    }

    #[test]
    fn filter_visible_keeps_parent_with_readable_descendant() {
        let tree = vec![MenuNode::group(
            1,
            "Reports",
            vec![MenuNode::screen(2, "Sales", "/sales").with_flags(true, false, false, false)],
        )];

        let visible = filter_visible(&tree);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].label, "Reports");
        assert_eq!(visible[0].children.len(), 1);
        assert_eq!(visible[0].children[0].label, "Sales");
    }

    #[test]
    fn filter_visible_prunes_pure_group_without_visible_children() {
        let tree = vec![MenuNode::group(
            1,
            "Reports",
            vec![MenuNode::screen(2, "Sales", "/sales")],
        )];

        assert!(filter_visible(&tree).is_empty());
    }

    #[test]
    fn filter_visible_keeps_navigable_group_without_visible_children() {
        let tree = vec![
            MenuNode::group(1, "Fuel", vec![MenuNode::screen(2, "Deliveries", "/fuel/deliveries")])
                .with_path("/fuel"),
        ];

        let visible = filter_visible(&tree);
        assert_eq!(visible.len(), 1);
        assert!(visible[0].children.is_empty());
    }

    #[test]
    fn filter_visible_drops_unreadable_leaf_despite_path() {
        let tree = vec![MenuNode::screen(1, "Assets", "/assets")];
        assert!(filter_visible(&tree).is_empty());
    }

    #[test]
    fn filter_visible_preserves_sibling_order() {
        let tree = vec![
            MenuNode::screen(1, "Assets", "/assets").with_flags(true, false, false, false),
            MenuNode::screen(2, "Employees", "/employees").with_flags(true, false, false, false),
            MenuNode::screen(3, "Departments", "/departments"),
            MenuNode::screen(4, "Fuel Logs", "/fuel/logs").with_flags(true, false, false, false),
        ];

        let labels: Vec<String> = filter_visible(&tree)
            .into_iter()
            .map(|node| node.label)
            .collect();
        assert_eq!(labels, vec!["Assets", "Employees", "Fuel Logs"]);
    }

    #[test]
    fn filter_visible_does_not_mutate_input() {
        let tree = fleet_tree();
        let before = tree.clone();
        let _ = filter_visible(&tree);
        assert_eq!(tree, before);
    }

    #[test]
    fn ancestor_chain_lists_labels_root_first() {
        let tree = fleet_tree();
        assert_eq!(
            find_open_ancestor_chain(&tree, "/maintenance/backlog"),
            vec!["Maintenance", "Backlog"]
        );
        assert_eq!(
            find_open_ancestor_chain(&tree, "/fleet/categories"),
            vec!["Fleet"]
        );
    }

    #[test]
    fn ancestor_chain_is_empty_for_root_level_match() {
        let tree = fleet_tree();
        assert!(find_open_ancestor_chain(&tree, "/dashboard").is_empty());
    }

    #[test]
    fn ancestor_chain_is_empty_for_unknown_path() {
        let tree = fleet_tree();
        assert!(find_open_ancestor_chain(&tree, "/hr/leave").is_empty());
    }

    #[test]
    fn queries_are_pure() {
        let tree = fleet_tree();

        assert_eq!(
            resolve_flag(&tree, "/fleet/equipment", PermissionKind::Create),
            resolve_flag(&tree, "/fleet/equipment", PermissionKind::Create)
        );
        assert_eq!(filter_visible(&tree), filter_visible(&tree));
        assert_eq!(
            find_open_ancestor_chain(&tree, "/maintenance/backlog"),
            find_open_ancestor_chain(&tree, "/maintenance/backlog")
        );
    }
}
