use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub id: Thing,
    pub belongs_to: Thing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Thing>,
    pub created_by: Thing,
    pub content: String,
    #[serde(default)]
    pub mentions: Vec<String>,
    pub likes_nr: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateReply {
    pub belongs_to: Thing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Thing>,
    pub created_by: Thing,
    pub content: String,
    pub mentions: Vec<String>,
}
