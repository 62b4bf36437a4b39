use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i32,
    pub job_title: String,
    pub company: String,
    pub industry: String,
    /// `YYYY-MM`
    pub start_date: String,
    /// `YYYY-MM`, null while `is_current_job`.
    pub end_date: Option<String>,
    pub is_current_job: bool,
    pub description: String,
    pub accomplishments: String,
    /// Each entry is an embedded JSON string `{"name","usage"}`.
    pub tools: Vec<String>,
    /// Each entry is an embedded JSON string `{"name","category","link?","date?"}`.
    pub education: Vec<String>,
    pub sort_order: i32,
}
