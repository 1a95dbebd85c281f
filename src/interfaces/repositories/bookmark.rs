use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::middleware::error::AppResult;
use crate::middleware::utils::db_utils::Pagination;
use crate::models::view::post::PostView;

#[async_trait]
pub trait BookmarksRepositoryInterface {
    /// Adds or removes the edge, returns whether it exists afterwards.
    async fn toggle(&self, user: Thing, post: Thing) -> AppResult<bool>;
    async fn exists(&self, user: Thing, post: Thing) -> AppResult<bool>;
    /// Bookmarked posts ordered by bookmark time.
    async fn list(&self, user: Thing, pagination: Pagination) -> AppResult<Vec<PostView>>;
    async fn count(&self, user: Thing) -> AppResult<u32>;
}
