use axum::Json;
use axum::extract::{Extension, Query, State};
use maintdesk_core::UserIdentity;
use tower_sessions::Session;

use crate::auth::session_token;
use crate::dto::{
    MenuFlagsResponse, MenuNodeResponse, OpenAncestorChainResponse, VisibleMenuResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct MenuPathQuery {
    pub path: String,
}

/// GET /api/menu - readable menu entries for the current user.
pub async fn visible_menu_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<VisibleMenuResponse>> {
    let response = match state.menu_session_service.visible_menu(user.subject()).await {
        Some(items) => VisibleMenuResponse {
            loaded: true,
            items: items.into_iter().map(MenuNodeResponse::from).collect(),
        },
        None => VisibleMenuResponse {
            loaded: false,
            items: Vec::new(),
        },
    };

    Ok(Json(response))
}

/// GET /api/menu/flags?path= - action flags gating one screen.
pub async fn menu_flags_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<MenuPathQuery>,
) -> ApiResult<Json<MenuFlagsResponse>> {
    let flags = state
        .menu_session_service
        .flags(user.subject(), query.path.as_str())
        .await;

    Ok(Json(MenuFlagsResponse::from(flags)))
}

/// GET /api/menu/expanded?path= - group labels to pre-expand for a path.
pub async fn open_ancestor_chain_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<MenuPathQuery>,
) -> ApiResult<Json<OpenAncestorChainResponse>> {
    let labels = state
        .menu_session_service
        .open_chain(user.subject(), query.path.as_str())
        .await;

    Ok(Json(OpenAncestorChainResponse { labels }))
}

/// POST /api/menu/reload - refetch the snapshot after a failed login load.
pub async fn reload_menu_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    session: Session,
) -> ApiResult<Json<VisibleMenuResponse>> {
    let token = session_token(&session).await?;
    state.menu_session_service.load(&user, &token).await?;

    visible_menu_handler(State(state), Extension(user)).await
}
