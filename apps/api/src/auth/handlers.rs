use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::middleware::AuthenticatedAdmin;
use crate::auth::password::{verify_dummy, verify_password};
use crate::auth::store::{create_session, delete_session, find_admin_by_username};
use crate::auth::{SESSION_COOKIE, SESSION_TTL_SECS};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::admin::AdminIdentity;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: AdminIdentity,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/admin/login
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), AppError> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password required".to_string(),
        ));
    }

    let Some(admin) = find_admin_by_username(&state.db, username).await? else {
        verify_dummy(&req.password).await?;
        warn!("Login failed for unknown user '{username}'");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&req.password, &admin.password).await? {
        warn!("Login failed for '{username}': wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let session = create_session(&state.db, &admin.id).await?;
    let cookie = session_cookie(&session.id, state.config.is_production());

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.into()))?,
    );

    info!("Admin login successful: {}", admin.username);
    Ok((
        headers,
        Json(LoginResponse {
            message: "Login successful",
            user: AdminIdentity::from(&admin),
        }),
    ))
}

/// POST /api/admin/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAdmin>,
) -> Result<(HeaderMap, Json<MessageResponse>), AppError> {
    delete_session(&state.db, &current.session_id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&expired_cookie()).map_err(|e| AppError::Internal(e.into()))?,
    );

    info!("Admin logout: {}", current.admin.username);
    Ok((
        headers,
        Json(MessageResponse {
            message: "Logout successful",
        }),
    ))
}

/// GET /api/admin/me
pub async fn handle_me(Extension(current): Extension<AuthenticatedAdmin>) -> Json<AdminIdentity> {
    Json(current.admin)
}

fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
