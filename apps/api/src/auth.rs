use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use maintdesk_core::{AccessToken, AppError, UserIdentity};
use tower_sessions::Session;
use tracing::{info, warn};

use crate::dto::{LoginRequest, UserIdentityResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Session key holding the authenticated identity.
pub const SESSION_USER_KEY: &str = "user_identity";
/// Session key holding the bearer token for menu service fetches.
pub const SESSION_TOKEN_KEY: &str = "access_token";

/// POST /auth/login - exchange credentials for a session and load the menu.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<UserIdentityResponse>> {
    let authenticated = state
        .auth_gateway
        .login(payload.username.as_str(), payload.password.as_str())
        .await?;

    // Fresh session id on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;
    session
        .insert(SESSION_USER_KEY, &authenticated.identity)
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session: {error}")))?;
    session
        .insert(SESSION_TOKEN_KEY, &authenticated.token)
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session: {error}")))?;

    // A failed fetch does not undo the login; permission queries stay
    // fail-closed until a reload succeeds.
    if let Err(error) = state
        .menu_session_service
        .load(&authenticated.identity, &authenticated.token)
        .await
    {
        warn!(
            subject = authenticated.identity.subject(),
            %error,
            "menu snapshot load failed at login"
        );
    }

    info!(subject = authenticated.identity.subject(), "user logged in");
    Ok(Json(UserIdentityResponse::from(authenticated.identity)))
}

/// POST /auth/logout - drop the session and its menu snapshot.
pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<StatusCode> {
    let subject = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .map(|identity| identity.subject().to_owned());

    if let Some(subject) = &subject {
        state.menu_session_service.clear(subject).await;
    }

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(subject) = subject {
        info!(subject, "user logged out");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - identity of the current session.
pub async fn me_handler(
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<UserIdentityResponse>> {
    Ok(Json(UserIdentityResponse::from(identity)))
}

/// Reads the bearer token stored at login.
pub async fn session_token(session: &Session) -> ApiResult<AccessToken> {
    session
        .get::<AccessToken>(SESSION_TOKEN_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session token: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("session holds no access token".to_owned()))
        .map_err(Into::into)
}
