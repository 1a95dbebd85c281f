pub mod bookmark_service;
pub mod post_service;
pub mod reply_service;
pub mod reply_tree;
pub mod report_service;
