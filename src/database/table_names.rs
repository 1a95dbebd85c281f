pub const POST_TABLE_NAME: &'static str = "post";
pub const REPLY_TABLE_NAME: &'static str = "reply";
pub const LIKE_TABLE_NAME: &'static str = "like";
pub const BOOKMARK_TABLE_NAME: &'static str = "bookmark";
pub const REPORT_TABLE_NAME: &'static str = "report";
pub const USER_TABLE_NAME: &'static str = "local_user";
