use sqlx::PgPool;
use tracing::info;

use crate::case_studies::input::CaseStudyRecord;
use crate::db::is_unique_violation;
use crate::errors::AppError;
use crate::models::case_study::CaseStudy;

/// Published articles, featured first, then newest.
pub async fn list_published(pool: &PgPool) -> sqlx::Result<Vec<CaseStudy>> {
    sqlx::query_as(
        "SELECT * FROM case_studies WHERE published ORDER BY featured DESC, created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> sqlx::Result<Vec<CaseStudy>> {
    sqlx::query_as("SELECT * FROM case_studies ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

pub async fn get_published_by_slug(pool: &PgPool, slug: &str) -> sqlx::Result<Option<CaseStudy>> {
    sqlx::query_as("SELECT * FROM case_studies WHERE slug = $1 AND published")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn create_case_study(pool: &PgPool, record: &CaseStudyRecord) -> Result<CaseStudy, AppError> {
    let created: CaseStudy = sqlx::query_as(
        r#"
        INSERT INTO case_studies
            (title, slug, description, content, featured_image, tags, published, featured)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&record.title)
    .bind(&record.slug)
    .bind(&record.description)
    .bind(&record.content)
    .bind(&record.featured_image)
    .bind(&record.tags)
    .bind(record.published)
    .bind(record.featured)
    .fetch_one(pool)
    .await
    .map_err(slug_conflict)?;

    info!("Created case study {} '{}'", created.id, created.slug);
    Ok(created)
}

pub async fn update_case_study(
    pool: &PgPool,
    id: i32,
    record: &CaseStudyRecord,
) -> Result<Option<CaseStudy>, AppError> {
    sqlx::query_as(
        r#"
        UPDATE case_studies
        SET title = $1, slug = $2, description = $3, content = $4, featured_image = $5,
            tags = $6, published = $7, featured = $8, updated_at = NOW()
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(&record.title)
    .bind(&record.slug)
    .bind(&record.description)
    .bind(&record.content)
    .bind(&record.featured_image)
    .bind(&record.tags)
    .bind(record.published)
    .bind(record.featured)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(slug_conflict)
}

pub async fn delete_case_study(pool: &PgPool, id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM case_studies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn slug_conflict(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        AppError::field("slug", "is already used by another case study")
    } else {
        AppError::Database(err)
    }
}
