use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::experiences::groupings::{group_by_industry, group_by_tool, Grouping};
use crate::experiences::input::ExperienceInput;
use crate::experiences::store::{
    create_experience, delete_experience, get_experience, list_experiences,
    list_experiences_by_sort_order, reorder_experiences, update_experience,
};
use crate::extract::{ApiJson, ApiPath};
use crate::models::experience::Experience;
use crate::ordering::ensure_unique_ids;
use crate::profile::store::get_profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderExperiencesRequest {
    pub experience_ids: Vec<i32>,
}

/// GET /api/experiences
pub async fn handle_list_experiences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, AppError> {
    Ok(Json(list_experiences(&state.db).await?))
}

/// GET /api/experiences/:id
pub async fn handle_get_experience(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Experience>, AppError> {
    get_experience(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))
}

/// GET /api/tools
pub async fn handle_list_tools(
    State(state): State<AppState>,
) -> Result<Json<Vec<Grouping>>, AppError> {
    let profile = get_profile(&state.db).await?;
    let experiences = list_experiences(&state.db).await?;
    Ok(Json(group_by_tool(&experiences, &profile.tools_order)))
}

/// GET /api/industries
pub async fn handle_list_industries(
    State(state): State<AppState>,
) -> Result<Json<Vec<Grouping>>, AppError> {
    let profile = get_profile(&state.db).await?;
    let experiences = list_experiences(&state.db).await?;
    Ok(Json(group_by_industry(&experiences, &profile.industries_order)))
}

/// GET /api/admin/experiences
pub async fn handle_admin_list_experiences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, AppError> {
    Ok(Json(list_experiences_by_sort_order(&state.db).await?))
}

/// POST /api/admin/experiences
pub async fn handle_create_experience(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ExperienceInput>,
) -> Result<(StatusCode, Json<Experience>), AppError> {
    let record = input.validate()?;
    let created = create_experience(&state.db, &record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/admin/experiences/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<ExperienceInput>,
) -> Result<Json<Experience>, AppError> {
    let record = input.validate()?;
    update_experience(&state.db, id, &record)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))
}

/// DELETE /api/admin/experiences/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, AppError> {
    if !delete_experience(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Experience {id} not found")));
    }
    info!("Deleted experience {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/experiences/reorder
///
/// Returns the list in its new order so an optimistic client can reconcile.
pub async fn handle_reorder_experiences(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReorderExperiencesRequest>,
) -> Result<Json<Vec<Experience>>, AppError> {
    ensure_unique_ids("experienceIds", &req.experience_ids)?;
    reorder_experiences(&state.db, &req.experience_ids).await?;
    Ok(Json(list_experiences_by_sort_order(&state.db).await?))
}
