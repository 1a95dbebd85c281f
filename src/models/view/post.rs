use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::middleware::utils::db_utils::ViewFieldSelector;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Thing,
    pub created_by: Thing,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub mentions: Vec<String>,
    pub reading_time: i64,
    pub likes_nr: i64,
    pub replies_nr: i64,
    pub views_nr: i64,
    #[serde(default)]
    pub has_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ViewFieldSelector for PostView {
    fn get_select_query_fields() -> String {
        "id,
        created_by,
        title,
        content,
        excerpt,
        tags,
        mentions,
        reading_time,
        likes_nr,
        replies_nr,
        views_nr,
        created_at,
        updated_at,
        array::len(<-like[WHERE in=$user]) > 0 as has_liked"
            .to_string()
    }
}
