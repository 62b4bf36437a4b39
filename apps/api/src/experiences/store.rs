use sqlx::PgPool;
use tracing::info;

use crate::experiences::input::ExperienceRecord;
use crate::models::experience::Experience;
use crate::ordering::assign_positions;

/// Public listing: most recent start date first. `YYYY-MM` strings sort
/// chronologically as text.
pub async fn list_experiences(pool: &PgPool) -> sqlx::Result<Vec<Experience>> {
    sqlx::query_as("SELECT * FROM experiences ORDER BY start_date DESC, id DESC")
        .fetch_all(pool)
        .await
}

/// Admin listing in manual order.
pub async fn list_experiences_by_sort_order(pool: &PgPool) -> sqlx::Result<Vec<Experience>> {
    sqlx::query_as(
        "SELECT * FROM experiences ORDER BY sort_order ASC, start_date DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_experience(pool: &PgPool, id: i32) -> sqlx::Result<Option<Experience>> {
    sqlx::query_as("SELECT * FROM experiences WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts a new experience at the end of the manual order.
pub async fn create_experience(pool: &PgPool, record: &ExperienceRecord) -> sqlx::Result<Experience> {
    let created: Experience = sqlx::query_as(
        r#"
        INSERT INTO experiences
            (job_title, company, industry, start_date, end_date, is_current_job,
             description, accomplishments, tools, education, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM experiences))
        RETURNING *
        "#,
    )
    .bind(&record.job_title)
    .bind(&record.company)
    .bind(&record.industry)
    .bind(&record.start_date)
    .bind(&record.end_date)
    .bind(record.is_current_job)
    .bind(&record.description)
    .bind(&record.accomplishments)
    .bind(&record.tools)
    .bind(&record.education)
    .fetch_one(pool)
    .await?;

    info!("Created experience {} ({} at {})", created.id, created.job_title, created.company);
    Ok(created)
}

/// Replaces every editable column. Returns `None` when no row has this id.
pub async fn update_experience(
    pool: &PgPool,
    id: i32,
    record: &ExperienceRecord,
) -> sqlx::Result<Option<Experience>> {
    sqlx::query_as(
        r#"
        UPDATE experiences
        SET job_title = $1, company = $2, industry = $3, start_date = $4, end_date = $5,
            is_current_job = $6, description = $7, accomplishments = $8, tools = $9,
            education = $10
        WHERE id = $11
        RETURNING *
        "#,
    )
    .bind(&record.job_title)
    .bind(&record.company)
    .bind(&record.industry)
    .bind(&record.start_date)
    .bind(&record.end_date)
    .bind(record.is_current_job)
    .bind(&record.description)
    .bind(&record.accomplishments)
    .bind(&record.tools)
    .bind(&record.education)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_experience(pool: &PgPool, id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM experiences WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Writes `sort_order = position` for each id, one UPDATE per row.
///
/// Not wrapped in a transaction: a failure part-way leaves the earlier rows
/// renumbered and the rest untouched. Unknown ids update nothing.
pub async fn reorder_experiences(pool: &PgPool, ids: &[i32]) -> sqlx::Result<()> {
    for (id, position) in assign_positions(ids) {
        sqlx::query("UPDATE experiences SET sort_order = $1 WHERE id = $2")
            .bind(position)
            .bind(id)
            .execute(pool)
            .await?;
    }
    info!("Reordered {} experiences", ids.len());
    Ok(())
}
