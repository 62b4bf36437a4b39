use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::profile::Profile;
use crate::ordering::normalize_names;
use crate::profile::store::{get_profile, set_order_array, update_profile, OrderArray, ProfileChanges};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub intro: Option<String>,
    pub education_categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsOrderRequest {
    pub tools_order: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustriesOrderRequest {
    pub industries_order: Vec<String>,
}

/// GET /api/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    Ok(Json(get_profile(&state.db).await?))
}

/// PUT /api/admin/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ProfileUpdateRequest>,
) -> Result<Json<Profile>, AppError> {
    let changes = ProfileChanges {
        name: req.name.map(|n| n.trim().to_string()),
        intro: req.intro,
        education_categories: req.education_categories.map(normalize_names),
    };
    Ok(Json(update_profile(&state.db, changes).await?))
}

/// PATCH /api/admin/tools-order
pub async fn handle_update_tools_order(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ToolsOrderRequest>,
) -> Result<Json<Profile>, AppError> {
    let names = normalize_names(req.tools_order);
    Ok(Json(set_order_array(&state.db, OrderArray::Tools, &names).await?))
}

/// PATCH /api/admin/industries-order
pub async fn handle_update_industries_order(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<IndustriesOrderRequest>,
) -> Result<Json<Profile>, AppError> {
    let names = normalize_names(req.industries_order);
    Ok(Json(
        set_order_array(&state.db, OrderArray::Industries, &names).await?,
    ))
}
