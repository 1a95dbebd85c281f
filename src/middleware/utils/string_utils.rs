use crate::middleware::error::{AppError, AppResult};
use surrealdb::sql::Thing;

/// Parses a raw record id (`post:abc`) and checks it points into `table`.
pub fn get_str_thing(value: &str, table: &str) -> AppResult<Thing> {
    let thing = Thing::try_from(value).map_err(|_| AppError::Generic {
        description: format!("`{value}` is not a valid id"),
    })?;
    if thing.tb != table {
        return Err(AppError::Generic {
            description: format!("`{value}` is not a {table} id"),
        });
    }
    Ok(thing)
}
