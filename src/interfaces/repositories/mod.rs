pub mod bookmark;
pub mod like;
pub mod post;
pub mod reply;
pub mod report;
