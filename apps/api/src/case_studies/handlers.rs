use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::case_studies::document::render_content;
use crate::case_studies::input::CaseStudyInput;
use crate::case_studies::store::{
    create_case_study, delete_case_study, get_published_by_slug, list_all, list_published,
    update_case_study,
};
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::case_study::CaseStudy;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CaseStudyDetail {
    #[serde(flatten)]
    pub case_study: CaseStudy,
    /// `content` rendered to HTML fragments.
    pub html: String,
}

/// GET /api/case-studies
pub async fn handle_list_case_studies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseStudy>>, AppError> {
    Ok(Json(list_published(&state.db).await?))
}

/// GET /api/case-studies/:slug
pub async fn handle_get_case_study(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<CaseStudyDetail>, AppError> {
    let case_study = get_published_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Case study '{slug}' not found")))?;
    let html = render_content(&case_study.content);
    Ok(Json(CaseStudyDetail { case_study, html }))
}

/// GET /api/admin/case-studies
pub async fn handle_admin_list_case_studies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseStudy>>, AppError> {
    Ok(Json(list_all(&state.db).await?))
}

/// POST /api/admin/case-studies
pub async fn handle_create_case_study(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CaseStudyInput>,
) -> Result<(StatusCode, Json<CaseStudy>), AppError> {
    let record = input.validate()?;
    Ok((StatusCode::CREATED, Json(create_case_study(&state.db, &record).await?)))
}

/// PUT /api/admin/case-studies/:id
pub async fn handle_update_case_study(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<CaseStudyInput>,
) -> Result<Json<CaseStudy>, AppError> {
    let record = input.validate()?;
    update_case_study(&state.db, id, &record)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Case study {id} not found")))
}

/// DELETE /api/admin/case-studies/:id
pub async fn handle_delete_case_study(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, AppError> {
    if !delete_case_study(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Case study {id} not found")));
    }
    info!("Deleted case study {id}");
    Ok(StatusCode::NO_CONTENT)
}
