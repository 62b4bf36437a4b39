use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Block document as saved by the editor, stored verbatim.
    pub content: String,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
