use serde::{Deserialize, Serialize};

/// Whether the post is in the user's bookmarks, after a toggle or on check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkStatus {
    pub bookmarked: bool,
}
