use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::SESSION_TTL_SECS;
use crate::models::admin::{AdminUser, SessionRow};

pub async fn find_admin_by_username(pool: &PgPool, username: &str) -> sqlx::Result<Option<AdminUser>> {
    sqlx::query_as("SELECT id, username, password FROM admin_users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Creates the admin user if no user with this username exists yet. An
/// existing user's password is left alone.
pub async fn ensure_admin(pool: &PgPool, username: &str, password: &str) -> anyhow::Result<()> {
    if find_admin_by_username(pool, username).await?.is_some() {
        debug!("Admin user '{username}' already exists");
        return Ok(());
    }

    let hash = hash_password(password).await?;
    sqlx::query(
        "INSERT INTO admin_users (id, username, password) VALUES ($1, $2, $3) ON CONFLICT (username) DO NOTHING",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(username)
    .bind(hash)
    .execute(pool)
    .await?;

    info!("Created admin user '{username}'");
    Ok(())
}

/// Opens a session for the admin and returns its token.
pub async fn create_session(pool: &PgPool, admin_id: &str) -> sqlx::Result<SessionRow> {
    let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let expires_at = Utc::now() + Duration::seconds(SESSION_TTL_SECS);

    sqlx::query_as(
        "INSERT INTO sessions (id, admin_id, expires_at) VALUES ($1, $2, $3) RETURNING id, admin_id, expires_at",
    )
    .bind(token)
    .bind(admin_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// Resolves a session token to its admin. Expired sessions are deleted on the
/// way and treated as missing.
pub async fn find_session_admin(pool: &PgPool, token: &str) -> sqlx::Result<Option<(SessionRow, AdminUser)>> {
    let session: Option<SessionRow> = sqlx::query_as("SELECT id, admin_id, expires_at FROM sessions WHERE id = $1")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    let Some(session) = session else {
        return Ok(None);
    };

    if session.expires_at <= Utc::now() {
        delete_session(pool, &session.id).await?;
        debug!("Expired session for admin {} removed", session.admin_id);
        return Ok(None);
    }

    let admin: Option<AdminUser> = sqlx::query_as("SELECT id, username, password FROM admin_users WHERE id = $1")
        .bind(&session.admin_id)
        .fetch_optional(pool)
        .await?;

    Ok(admin.map(|admin| (session, admin)))
}

pub async fn delete_session(pool: &PgPool, token: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}
