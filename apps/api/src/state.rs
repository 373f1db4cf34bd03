use std::sync::Arc;

use maintdesk_application::{AuthGateway, MenuSessionService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_gateway: Arc<dyn AuthGateway>,
    pub menu_session_service: MenuSessionService,
}
