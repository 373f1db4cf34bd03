//! Maintdesk API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod auth;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use maintdesk_application::{AuthGateway, MenuSessionService};
use maintdesk_core::AppError;
use maintdesk_infrastructure::{
    HttpAuthGateway, HttpMenuSource, InMemoryAuthGateway, InMemoryMenuSource,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::api_config::{ApiConfig, MenuProviderConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    let (auth_gateway, menu_session_service): (Arc<dyn AuthGateway>, MenuSessionService) =
        match &config.menu_provider {
            MenuProviderConfig::Http(remote) => {
                let auth_gateway: Arc<dyn AuthGateway> =
                    Arc::new(HttpAuthGateway::new(remote.auth_service_url.as_str())?);
                let menu_source = Arc::new(HttpMenuSource::new(remote.menu_service_url.as_str())?);
                (auth_gateway, MenuSessionService::new(menu_source))
            }
            MenuProviderConfig::Seed => {
                let auth_gateway = Arc::new(InMemoryAuthGateway::new());
                let menu_source = Arc::new(InMemoryMenuSource::new());
                dev_seed::run(&auth_gateway, &menu_source).await;
                info!("seeded local users and menu trees");
                let auth_gateway: Arc<dyn AuthGateway> = auth_gateway;
                (auth_gateway, MenuSessionService::new(menu_source))
            }
        };

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&config.frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let app_state = AppState {
        auth_gateway,
        menu_session_service,
    };

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route("/api/menu", get(handlers::menu::visible_menu_handler))
        .route("/api/menu/flags", get(handlers::menu::menu_flags_handler))
        .route(
            "/api/menu/expanded",
            get(handlers::menu::open_ancestor_chain_handler),
        )
        .route("/api/menu/reload", post(handlers::menu::reload_menu_handler))
        .route_layer(from_fn(middleware::require_auth));

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "maintdesk-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
