use serde::{Deserialize, Serialize};

/// Outcome of toggling a like on a post or reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeToggle {
    pub liked: bool,
    pub likes_count: u32,
}
