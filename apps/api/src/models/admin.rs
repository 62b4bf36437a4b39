use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    /// bcrypt hash
    pub password: String,
}

/// The admin identity exposed over the API. Never carries the hash.
#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentity {
    pub id: String,
    pub username: String,
}

impl From<&AdminUser> for AdminIdentity {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: String,
    pub admin_id: String,
    pub expires_at: DateTime<Utc>,
}
