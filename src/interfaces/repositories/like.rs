use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::like::LikeToggle;
use crate::middleware::error::AppResult;

#[async_trait]
pub trait LikesRepositoryInterface {
    async fn toggle(&self, user: Thing, out: Thing) -> AppResult<LikeToggle>;
}
