use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub intro: String,
    pub education_categories: Vec<String>,
    pub tools_order: Vec<String>,
    pub industries_order: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
