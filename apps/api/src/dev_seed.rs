//! Built-in users and menu tree for running the console without the two
//! remote services.

use maintdesk_core::UserIdentity;
use maintdesk_domain::MenuNode;
use maintdesk_infrastructure::{InMemoryAuthGateway, InMemoryMenuSource};

const SEED_ADMIN_USERNAME: &str = "admin";
const SEED_ADMIN_PASSWORD: &str = "admin";
const SEED_ADMIN_SUBJECT: &str = "seed-admin";

const SEED_CLERK_USERNAME: &str = "clerk";
const SEED_CLERK_PASSWORD: &str = "clerk";
const SEED_CLERK_SUBJECT: &str = "seed-clerk";

/// Registers the seed users and their permission trees.
pub async fn run(auth_gateway: &InMemoryAuthGateway, menu_source: &InMemoryMenuSource) {
    auth_gateway
        .register_user(
            SEED_ADMIN_USERNAME,
            SEED_ADMIN_PASSWORD,
            UserIdentity::new(
                SEED_ADMIN_SUBJECT,
                "Maintenance Admin",
                Some("admin@maintdesk.local".to_owned()),
            ),
        )
        .await;
    auth_gateway
        .register_user(
            SEED_CLERK_USERNAME,
            SEED_CLERK_PASSWORD,
            UserIdentity::new(
                SEED_CLERK_SUBJECT,
                "Dispatch Clerk",
                Some("clerk@maintdesk.local".to_owned()),
            ),
        )
        .await;

    menu_source.set_menu(SEED_ADMIN_SUBJECT, admin_menu()).await;
    menu_source.set_menu(SEED_CLERK_SUBJECT, clerk_menu()).await;
}

fn admin_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::screen(1, "Dashboard", "/dashboard").with_flags(true, false, false, false),
        MenuNode::group(
            2,
            "Administration",
            vec![
                MenuNode::screen(3, "Assets", "/assets").with_flags(true, true, true, true),
                MenuNode::screen(4, "Employees", "/employees").with_flags(true, true, true, true),
                MenuNode::screen(5, "Departments", "/departments")
                    .with_flags(true, true, true, true),
            ],
        ),
        MenuNode::group(
            6,
            "Fleet",
            vec![
                MenuNode::screen(7, "Heavy Equipment", "/fleet/equipment")
                    .with_flags(true, true, true, true),
                MenuNode::screen(8, "Equipment Categories", "/fleet/categories")
                    .with_flags(true, true, true, true),
            ],
        ),
        MenuNode::group(
            9,
            "Fuel Logistics",
            vec![
                MenuNode::screen(10, "Fuel Requests", "/fuel/requests")
                    .with_flags(true, true, true, true),
                MenuNode::screen(11, "Fuel Deliveries", "/fuel/deliveries")
                    .with_flags(true, true, true, true),
            ],
        ),
        MenuNode::group(
            12,
            "Maintenance",
            vec![
                MenuNode::screen(13, "Backlog Tickets", "/maintenance/backlog")
                    .with_flags(true, true, true, true),
                MenuNode::screen(14, "Work Orders", "/maintenance/work-orders")
                    .with_flags(true, true, true, true),
            ],
        ),
    ]
}

fn clerk_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::screen(1, "Dashboard", "/dashboard").with_flags(true, false, false, false),
        MenuNode::group(
            2,
            "Administration",
            vec![
                MenuNode::screen(3, "Assets", "/assets").with_flags(true, false, false, false),
                MenuNode::screen(4, "Employees", "/employees"),
                MenuNode::screen(5, "Departments", "/departments"),
            ],
        ),
        MenuNode::group(
            6,
            "Fleet",
            vec![
                MenuNode::screen(7, "Heavy Equipment", "/fleet/equipment"),
                MenuNode::screen(8, "Equipment Categories", "/fleet/categories"),
            ],
        ),
        MenuNode::group(
            9,
            "Fuel Logistics",
            vec![
                MenuNode::screen(10, "Fuel Requests", "/fuel/requests")
                    .with_flags(true, true, false, false),
                MenuNode::screen(11, "Fuel Deliveries", "/fuel/deliveries")
                    .with_flags(true, false, false, false),
            ],
        ),
        MenuNode::group(
            12,
            "Maintenance",
            vec![
                MenuNode::screen(13, "Backlog Tickets", "/maintenance/backlog")
                    .with_flags(true, true, true, false),
                MenuNode::screen(14, "Work Orders", "/maintenance/work-orders"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use maintdesk_domain::{PermissionKind, filter_visible, resolve_flag};

    use super::{admin_menu, clerk_menu};

    #[test]
    fn admin_holds_every_flag_on_fleet_screens() {
        let tree = admin_menu();
        for kind in PermissionKind::all() {
            assert!(resolve_flag(&tree, "/fleet/equipment", *kind));
        }
    }

    #[test]
    fn clerk_cannot_delete_backlog_tickets() {
        let tree = clerk_menu();
        assert!(resolve_flag(&tree, "/maintenance/backlog", PermissionKind::Update));
        assert!(!resolve_flag(
            &tree,
            "/maintenance/backlog",
            PermissionKind::Delete
        ));
    }

    #[test]
    fn clerk_visible_menu_hides_the_fleet_group() {
        let visible = filter_visible(&clerk_menu());
        let labels: Vec<&str> = visible.iter().map(|node| node.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Dashboard", "Administration", "Fuel Logistics", "Maintenance"]
        );
    }

    #[test]
    fn clerk_sees_only_readable_administration_entries() {
        let visible = filter_visible(&clerk_menu());
        let administration = visible.iter().find(|node| node.label == "Administration");
        let children: Vec<&str> = administration
            .map(|node| node.children.iter().map(|child| child.label.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(children, vec!["Assets"]);
    }
}
