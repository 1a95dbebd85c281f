use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::post::{CreatePost, Post, PostFilter, TagCount, UpdatePost};
use crate::middleware::error::AppResult;
use crate::middleware::utils::db_utils::Pagination;
use crate::models::view::post::PostView;

#[async_trait]
pub trait PostsRepositoryInterface {
    async fn create(&self, data: CreatePost) -> AppResult<Post>;
    async fn get_by_id(&self, post_id: &Thing) -> AppResult<Option<Post>>;
    async fn get_view_by_id(&self, post_id: &Thing, viewer: Option<Thing>)
        -> AppResult<Option<PostView>>;
    async fn list(
        &self,
        filter: PostFilter,
        viewer: Option<Thing>,
        pagination: Pagination,
    ) -> AppResult<Vec<PostView>>;
    /// Most used tags, highest count first.
    async fn trending_tags(&self, limit: u16) -> AppResult<Vec<TagCount>>;
    /// Other posts sharing at least one of `tags`, most liked first.
    async fn related(
        &self,
        post_id: &Thing,
        tags: Vec<String>,
        viewer: Option<Thing>,
        limit: u16,
    ) -> AppResult<Vec<PostView>>;
    async fn update(&self, post_id: &Thing, data: UpdatePost) -> AppResult<Post>;
    async fn increment_views(&self, post_id: &Thing) -> AppResult<()>;
    /// Removes the post together with all of its replies.
    async fn delete(&self, post_id: &Thing) -> AppResult<()>;
}
