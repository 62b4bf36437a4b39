use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::auth::store::find_session_admin;
use crate::auth::SESSION_COOKIE;
use crate::errors::AppError;
use crate::models::admin::AdminIdentity;
use crate::state::AppState;

/// Inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub session_id: String,
    pub admin: AdminIdentity,
}

/// Session guard for admin routes. Rejects with 401 before the handler runs,
/// so an unauthenticated request never reaches a mutation.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(&headers);
    let Some(token) = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
    else {
        warn!("{} {} rejected: no session cookie", request.method(), request.uri().path());
        return Err(AppError::Unauthorized);
    };

    let Some((session, admin)) = find_session_admin(&state.db, &token).await? else {
        warn!("{} {} rejected: unknown or expired session", request.method(), request.uri().path());
        return Err(AppError::Unauthorized);
    };

    request.extensions_mut().insert(AuthenticatedAdmin {
        session_id: session.id,
        admin: AdminIdentity::from(&admin),
    });
    Ok(next.run(request).await)
}
