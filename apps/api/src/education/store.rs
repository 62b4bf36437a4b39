use sqlx::PgPool;
use tracing::info;

use crate::education::input::EducationRecord;
use crate::models::education::Education;
use crate::ordering::assign_positions;

pub async fn list_education(pool: &PgPool) -> sqlx::Result<Vec<Education>> {
    sqlx::query_as("SELECT * FROM education ORDER BY category ASC, sort_order ASC, id ASC")
        .fetch_all(pool)
        .await
}

/// Inserts at the end of its category.
pub async fn create_education(pool: &PgPool, record: &EducationRecord) -> sqlx::Result<Education> {
    let created: Education = sqlx::query_as(
        r#"
        INSERT INTO education (name, category, link, date, sort_order)
        VALUES ($1, $2, $3, $4,
                (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM education WHERE category = $2))
        RETURNING *
        "#,
    )
    .bind(&record.name)
    .bind(&record.category)
    .bind(&record.link)
    .bind(&record.date)
    .fetch_one(pool)
    .await?;

    info!("Created education {} in '{}'", created.id, created.category);
    Ok(created)
}

pub async fn update_education(
    pool: &PgPool,
    id: i32,
    record: &EducationRecord,
) -> sqlx::Result<Option<Education>> {
    sqlx::query_as(
        r#"
        UPDATE education
        SET name = $1, category = $2, link = $3, date = $4
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&record.name)
    .bind(&record.category)
    .bind(&record.link)
    .bind(&record.date)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_education(pool: &PgPool, id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM education WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// One UPDATE per id, no transaction. Same contract as experience reordering.
pub async fn reorder_education(pool: &PgPool, ids: &[i32]) -> sqlx::Result<()> {
    for (id, position) in assign_positions(ids) {
        sqlx::query("UPDATE education SET sort_order = $1 WHERE id = $2")
            .bind(position)
            .bind(id)
            .execute(pool)
            .await?;
    }
    info!("Reordered {} education entries", ids.len());
    Ok(())
}
