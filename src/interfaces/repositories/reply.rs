use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::reply::{CreateReply, Reply};
use crate::middleware::error::AppResult;
use crate::models::view::reply::ReplyView;

#[async_trait]
pub trait RepliesRepositoryInterface {
    /// Stores the reply and increments the owning post's `replies_nr`.
    async fn create(&self, data: CreateReply) -> AppResult<Reply>;
    async fn get_by_id(&self, reply_id: &Thing) -> AppResult<Option<Reply>>;
    /// All replies of a post, oldest first.
    async fn get_by_post(&self, post_id: &Thing, viewer: Option<Thing>)
        -> AppResult<Vec<ReplyView>>;
    /// Ids of the direct children of any of `parents`.
    async fn get_children_ids(&self, parents: Vec<Thing>) -> AppResult<Vec<Thing>>;
    /// Removes `reply_ids` and decrements `replies_nr` of `post_id` by the
    /// number of replies actually removed, as one transaction.
    async fn delete_subtree(&self, post_id: &Thing, reply_ids: Vec<Thing>) -> AppResult<u32>;
}
