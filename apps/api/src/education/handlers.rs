use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::education::input::EducationInput;
use crate::education::store::{
    create_education, delete_education, list_education, reorder_education, update_education,
};
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::education::Education;
use crate::ordering::ensure_unique_ids;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEducationRequest {
    pub education_ids: Vec<i32>,
}

/// GET /api/education and GET /api/admin/education
pub async fn handle_list_education(
    State(state): State<AppState>,
) -> Result<Json<Vec<Education>>, AppError> {
    Ok(Json(list_education(&state.db).await?))
}

/// POST /api/admin/education
pub async fn handle_create_education(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<EducationInput>,
) -> Result<(StatusCode, Json<Education>), AppError> {
    let record = input.validate()?;
    Ok((StatusCode::CREATED, Json(create_education(&state.db, &record).await?)))
}

/// PUT /api/admin/education/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<EducationInput>,
) -> Result<Json<Education>, AppError> {
    let record = input.validate()?;
    update_education(&state.db, id, &record)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Education {id} not found")))
}

/// DELETE /api/admin/education/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, AppError> {
    if !delete_education(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Education {id} not found")));
    }
    info!("Deleted education {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/education/reorder
pub async fn handle_reorder_education(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReorderEducationRequest>,
) -> Result<Json<Vec<Education>>, AppError> {
    ensure_unique_ids("educationIds", &req.education_ids)?;
    reorder_education(&state.db, &req.education_ids).await?;
    Ok(Json(list_education(&state.db).await?))
}
