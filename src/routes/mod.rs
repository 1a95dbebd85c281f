pub mod bookmarks;
pub mod posts;
pub mod reply;
pub mod reports;
