use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::middleware::utils::db_utils::ViewFieldSelector;
use crate::services::reply_tree::TreeItem;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyView {
    pub id: Thing,
    pub belongs_to: Thing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Thing>,
    pub created_by: Thing,
    pub content: String,
    #[serde(default)]
    pub mentions: Vec<String>,
    pub likes_nr: i64,
    #[serde(default)]
    pub has_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ViewFieldSelector for ReplyView {
    fn get_select_query_fields() -> String {
        "id,
        belongs_to,
        parent,
        created_by,
        content,
        mentions,
        likes_nr,
        created_at,
        updated_at,
        array::len(<-like[WHERE in=$user]) > 0 as has_liked"
            .to_string()
    }
}

impl TreeItem for ReplyView {
    type Id = Thing;

    fn item_id(&self) -> &Thing {
        &self.id
    }

    fn parent_id(&self) -> Option<&Thing> {
        self.parent.as_ref()
    }
}
