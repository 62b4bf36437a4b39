use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub link: Option<String>,
    pub date: Option<String>,
    pub sort_order: i32,
}
