use sqlx::PgPool;
use tracing::info;

use crate::models::profile::Profile;

/// Fields an admin may change on the profile. `None` leaves a field untouched.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub intro: Option<String>,
    pub education_categories: Option<Vec<String>>,
}

/// The profile table holds exactly one row, with this id.
pub const PROFILE_ID: i32 = 1;

const SELECT_PROFILE: &str = "SELECT * FROM profile WHERE id = $1";
const INSERT_DEFAULT_PROFILE: &str =
    "INSERT INTO profile (id) VALUES ($1) ON CONFLICT (id) DO NOTHING";

/// Returns the profile row, creating it with column defaults on first read.
/// Concurrent first reads race on the insert; the losers' inserts are no-ops.
pub async fn get_profile(pool: &PgPool) -> sqlx::Result<Profile> {
    if let Some(profile) = fetch_profile(pool).await? {
        return Ok(profile);
    }

    let inserted = sqlx::query(INSERT_DEFAULT_PROFILE)
        .bind(PROFILE_ID)
        .execute(pool)
        .await?;
    if inserted.rows_affected() > 0 {
        info!("Created default profile row");
    }

    fetch_profile(pool).await?.ok_or(sqlx::Error::RowNotFound)
}

async fn fetch_profile(pool: &PgPool) -> sqlx::Result<Option<Profile>> {
    sqlx::query_as(SELECT_PROFILE)
        .bind(PROFILE_ID)
        .fetch_optional(pool)
        .await
}

pub async fn update_profile(pool: &PgPool, changes: ProfileChanges) -> sqlx::Result<Profile> {
    let current = get_profile(pool).await?;

    sqlx::query_as(
        r#"
        UPDATE profile
        SET name = COALESCE($1, name),
            intro = COALESCE($2, intro),
            education_categories = COALESCE($3, education_categories),
            updated_at = NOW()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(changes.name)
    .bind(changes.intro)
    .bind(changes.education_categories)
    .bind(current.id)
    .fetch_one(pool)
    .await
}

/// Which profile order array to overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArray {
    Tools,
    Industries,
}

impl OrderArray {
    fn column(self) -> &'static str {
        match self {
            OrderArray::Tools => "tools_order",
            OrderArray::Industries => "industries_order",
        }
    }
}

/// Replaces one order array wholesale. A single-row UPDATE, so readers see
/// either the old or the new sequence.
pub async fn set_order_array(
    pool: &PgPool,
    which: OrderArray,
    names: &[String],
) -> sqlx::Result<Profile> {
    let current = get_profile(pool).await?;

    let sql = format!(
        "UPDATE profile SET {} = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        which.column()
    );
    let updated: Profile = sqlx::query_as(&sql)
        .bind(names)
        .bind(current.id)
        .fetch_one(pool)
        .await?;

    info!("Stored {} {:?} order entries", names.len(), which);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT_MIGRATION: &str = include_str!("../../migrations/20250101000000_init.sql");

    #[test]
    fn test_profile_table_allows_one_row() {
        let table = INIT_MIGRATION
            .split("CREATE TABLE")
            .find(|t| t.contains("profile ("))
            .unwrap();
        assert!(table.contains("CHECK (id = 1)"));
        assert!(!table.contains("SERIAL"));
    }

    #[test]
    fn test_default_profile_insert_is_idempotent() {
        assert!(INSERT_DEFAULT_PROFILE.contains("ON CONFLICT (id) DO NOTHING"));
        assert_eq!(PROFILE_ID, 1);
    }

    #[test]
    fn test_order_array_columns() {
        assert_eq!(OrderArray::Tools.column(), "tools_order");
        assert_eq!(OrderArray::Industries.column(), "industries_order");
    }
}
