use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub order_dir: Option<QryOrder>,
    pub count: u16,
    pub start: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display)]
pub enum QryOrder {
    DESC,
    ASC,
}

pub trait ViewFieldSelector {
    // select query fields to fill the View object
    fn get_select_query_fields() -> String;
}
