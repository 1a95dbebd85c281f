use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    database::table_names::{POST_TABLE_NAME, REPLY_TABLE_NAME, USER_TABLE_NAME},
    entities::{
        like::LikeToggle,
        reply::{CreateReply, Reply},
    },
    interfaces::repositories::{
        like::LikesRepositoryInterface, post::PostsRepositoryInterface,
        reply::RepliesRepositoryInterface,
    },
    middleware::{
        error::{AppError, AppResult, CtxResult},
        utils::string_utils::get_str_thing,
    },
    models::view::reply::ReplyView,
    services::reply_tree::{build_tree, find_orphans, OrphanPolicy, ReplyNode},
    utils::{mentions::extract_mentions, validate_utils::validate_not_blank},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ReplyInput {
    pub post_id: String,
    #[serde(default)]
    pub parent_reply_id: Option<String>,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 2000, message = "Content must be less than 2000 characters")
    )]
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReplyTreeView {
    pub replies: Vec<ReplyNode<ReplyView>>,
    pub total: usize,
}

impl From<Reply> for ReplyView {
    fn from(value: Reply) -> Self {
        Self {
            id: value.id,
            belongs_to: value.belongs_to,
            parent: value.parent,
            created_by: value.created_by,
            content: value.content,
            mentions: value.mentions,
            likes_nr: value.likes_nr,
            has_liked: false,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

pub struct ReplyService<'a, R, P, L>
where
    R: RepliesRepositoryInterface,
    P: PostsRepositoryInterface,
    L: LikesRepositoryInterface,
{
    replies_repository: &'a R,
    posts_repository: &'a P,
    likes_repository: &'a L,
}

impl<'a, R, P, L> ReplyService<'a, R, P, L>
where
    R: RepliesRepositoryInterface,
    P: PostsRepositoryInterface,
    L: LikesRepositoryInterface,
{
    pub fn new(replies_repository: &'a R, posts_repository: &'a P, likes_repository: &'a L) -> Self {
        Self {
            replies_repository,
            posts_repository,
            likes_repository,
        }
    }

    pub async fn create(&self, user_id: &str, data: ReplyInput) -> CtxResult<ReplyNode<ReplyView>> {
        data.validate()?;

        let post_id = get_str_thing(&data.post_id, POST_TABLE_NAME)?;
        let post = self
            .posts_repository
            .get_by_id(&post_id)
            .await?
            .ok_or(AppError::EntityFailIdNotFound {
                ident: data.post_id.clone(),
            })?;

        let parent = match data.parent_reply_id.as_deref() {
            Some(parent_id) if !parent_id.is_empty() => {
                let parent_thing = get_str_thing(parent_id, REPLY_TABLE_NAME)?;
                let parent = self
                    .replies_repository
                    .get_by_id(&parent_thing)
                    .await?
                    .ok_or(AppError::EntityFailIdNotFound {
                        ident: parent_id.to_string(),
                    })?;
                if parent.belongs_to != post.id {
                    return Err(AppError::Generic {
                        description: "Parent reply does not belong to this post".to_string(),
                    }
                    .into());
                }
                Some(parent.id)
            }
            _ => None,
        };

        let content = data.content.trim().to_string();
        let reply = self
            .replies_repository
            .create(CreateReply {
                belongs_to: post.id,
                parent,
                created_by: Thing::from((USER_TABLE_NAME, user_id)),
                mentions: extract_mentions(&content),
                content,
            })
            .await?;

        Ok(ReplyNode {
            reply: reply.into(),
            children: vec![],
        })
    }

    /// The reply thread of a post as a nested tree, oldest replies first.
    pub async fn get_tree(
        &self,
        post_id: &str,
        viewer_id: Option<&str>,
        orphans: OrphanPolicy,
    ) -> CtxResult<ReplyTreeView> {
        let post_thing = get_str_thing(post_id, POST_TABLE_NAME)?;
        self.posts_repository
            .get_by_id(&post_thing)
            .await?
            .ok_or(AppError::EntityFailIdNotFound {
                ident: post_id.to_string(),
            })?;

        let viewer = viewer_id.map(|id| Thing::from((USER_TABLE_NAME, id)));
        let replies = self
            .replies_repository
            .get_by_post(&post_thing, viewer)
            .await?;

        let orphaned = find_orphans(&replies);
        if !orphaned.is_empty() {
            warn!(
                post = %post_thing,
                ?orphans,
                count = orphaned.len(),
                "replies reference a parent missing from the post"
            );
        }

        let total = replies.len();
        Ok(ReplyTreeView {
            replies: build_tree(replies, None, orphans),
            total,
        })
    }

    pub async fn like(&self, reply_id: &str, user_id: &str) -> CtxResult<LikeToggle> {
        let reply_thing = get_str_thing(reply_id, REPLY_TABLE_NAME)?;
        let reply = self
            .replies_repository
            .get_by_id(&reply_thing)
            .await?
            .ok_or(AppError::EntityFailIdNotFound {
                ident: reply_id.to_string(),
            })?;

        let toggle = self
            .likes_repository
            .toggle(Thing::from((USER_TABLE_NAME, user_id)), reply.id)
            .await?;
        Ok(toggle)
    }

    /// Deletes the reply with everything nested under it and returns how
    /// many replies were removed. Only the author may delete.
    pub async fn delete_subtree(&self, reply_id: &str, user_id: &str) -> CtxResult<u32> {
        let reply_thing = get_str_thing(reply_id, REPLY_TABLE_NAME)?;
        let not_found = || AppError::EntityFailIdNotFound {
            ident: reply_id.to_string(),
        };

        let reply = self
            .replies_repository
            .get_by_id(&reply_thing)
            .await?
            .ok_or_else(not_found)?;

        if reply.created_by != Thing::from((USER_TABLE_NAME, user_id)) {
            return Err(AppError::Forbidden.into());
        }

        if self
            .posts_repository
            .get_by_id(&reply.belongs_to)
            .await?
            .is_none()
        {
            warn!(post = %reply.belongs_to, "deleting replies of a missing post, counter left as is");
        }

        let subtree = self.collect_subtree(reply.id.clone()).await?;
        let removed = self
            .replies_repository
            .delete_subtree(&reply.belongs_to, subtree)
            .await?;

        // a concurrent delete removed the subtree first
        if removed == 0 {
            return Err(not_found().into());
        }

        info!(reply = %reply.id, post = %reply.belongs_to, removed, "reply subtree deleted");
        Ok(removed)
    }

    /// The root followed by all of its descendants, one level at a time.
    async fn collect_subtree(&self, root: Thing) -> AppResult<Vec<Thing>> {
        let mut visited: HashSet<Thing> = HashSet::from([root.clone()]);
        let mut subtree = vec![root.clone()];
        let mut frontier = vec![root];

        while !frontier.is_empty() {
            let children = self.replies_repository.get_children_ids(frontier).await?;
            frontier = children
                .into_iter()
                .filter(|id| visited.insert(id.clone()))
                .collect();
            subtree.extend(frontier.iter().cloned());
        }
        Ok(subtree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::post::{CreatePost, Post, PostFilter, TagCount, UpdatePost};
    use crate::middleware::utils::db_utils::Pagination;
    use crate::models::view::post::PostView;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    struct MemReplies {
        replies: Mutex<Vec<Reply>>,
        post_counter: Mutex<i64>,
    }

    fn reply(id: &str, parent: Option<&str>, author: &str) -> Reply {
        Reply {
            id: Thing::from((REPLY_TABLE_NAME, id)),
            belongs_to: Thing::from((POST_TABLE_NAME, "p")),
            parent: parent.map(|p| Thing::from((REPLY_TABLE_NAME, p))),
            created_by: Thing::from((USER_TABLE_NAME, author)),
            content: format!("reply {id}"),
            mentions: vec![],
            likes_nr: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[async_trait]
    impl RepliesRepositoryInterface for MemReplies {
        async fn create(&self, _data: CreateReply) -> AppResult<Reply> {
            unimplemented!()
        }

        async fn get_by_id(&self, reply_id: &Thing) -> AppResult<Option<Reply>> {
            let replies = self.replies.lock().unwrap();
            Ok(replies.iter().find(|r| &r.id == reply_id).cloned())
        }

        async fn get_by_post(&self, _: &Thing, _: Option<Thing>) -> AppResult<Vec<ReplyView>> {
            Ok(self
                .replies
                .lock()
                .unwrap()
                .iter()
                .cloned()
                .map(ReplyView::from)
                .collect())
        }

        async fn get_children_ids(&self, parents: Vec<Thing>) -> AppResult<Vec<Thing>> {
            let replies = self.replies.lock().unwrap();
            Ok(replies
                .iter()
                .filter(|r| r.parent.as_ref().is_some_and(|p| parents.contains(p)))
                .map(|r| r.id.clone())
                .collect())
        }

        async fn delete_subtree(&self, _post: &Thing, reply_ids: Vec<Thing>) -> AppResult<u32> {
            let mut replies = self.replies.lock().unwrap();
            let before = replies.len();
            replies.retain(|r| !reply_ids.contains(&r.id));
            let removed = (before - replies.len()) as i64;
            let mut counter = self.post_counter.lock().unwrap();
            *counter = (*counter - removed).max(0);
            Ok(removed as u32)
        }
    }

    struct NoPosts;

    #[async_trait]
    impl PostsRepositoryInterface for NoPosts {
        async fn create(&self, _: CreatePost) -> AppResult<Post> {
            unimplemented!()
        }
        async fn get_by_id(&self, _: &Thing) -> AppResult<Option<Post>> {
            Ok(None)
        }
        async fn get_view_by_id(&self, _: &Thing, _: Option<Thing>) -> AppResult<Option<PostView>> {
            Ok(None)
        }
        async fn list(&self, _: PostFilter, _: Option<Thing>, _: Pagination) -> AppResult<Vec<PostView>> {
            Ok(vec![])
        }
        async fn trending_tags(&self, _: u16) -> AppResult<Vec<TagCount>> {
            Ok(vec![])
        }
        async fn related(
            &self,
            _: &Thing,
            _: Vec<String>,
            _: Option<Thing>,
            _: u16,
        ) -> AppResult<Vec<PostView>> {
            Ok(vec![])
        }
        async fn update(&self, _: &Thing, _: UpdatePost) -> AppResult<Post> {
            unimplemented!()
        }
        async fn increment_views(&self, _: &Thing) -> AppResult<()> {
            Ok(())
        }
        async fn delete(&self, _: &Thing) -> AppResult<()> {
            Ok(())
        }
    }

    struct NoLikes;

    #[async_trait]
    impl LikesRepositoryInterface for NoLikes {
        async fn toggle(&self, _: Thing, _: Thing) -> AppResult<LikeToggle> {
            unimplemented!()
        }
    }

    fn store(replies: Vec<Reply>) -> MemReplies {
        MemReplies {
            post_counter: Mutex::new(replies.len() as i64),
            replies: Mutex::new(replies),
        }
    }

    #[tokio::test]
    async fn deletes_reply_with_descendants() {
        let replies = store(vec![
            reply("a", None, "u1"),
            reply("b", Some("a"), "u2"),
            reply("c", Some("a"), "u2"),
            reply("d", Some("b"), "u1"),
            reply("e", None, "u1"),
        ]);
        let service = ReplyService::new(&replies, &NoPosts, &NoLikes);

        let removed = service.delete_subtree("reply:a", "u1").await.unwrap();
        assert_eq!(removed, 4);
        assert_eq!(*replies.post_counter.lock().unwrap(), 1);
        let left: Vec<String> = replies
            .replies
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.id.id.to_raw())
            .collect();
        assert_eq!(left, vec!["e".to_string()]);
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let replies = store(vec![reply("a", None, "u1"), reply("b", None, "u1")]);
        let service = ReplyService::new(&replies, &NoPosts, &NoLikes);

        assert_eq!(service.delete_subtree("reply:a", "u1").await.unwrap(), 1);
        let err = service.delete_subtree("reply:a", "u1").await.unwrap_err();
        assert!(matches!(err.error, AppError::EntityFailIdNotFound { .. }));
        assert_eq!(*replies.post_counter.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn only_author_deletes() {
        let replies = store(vec![reply("a", None, "u1"), reply("b", Some("a"), "u2")]);
        let service = ReplyService::new(&replies, &NoPosts, &NoLikes);

        let err = service.delete_subtree("reply:a", "u2").await.unwrap_err();
        assert_eq!(err.error, AppError::Forbidden);
        assert_eq!(replies.replies.lock().unwrap().len(), 2);
        assert_eq!(*replies.post_counter.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn cyclic_children_terminate() {
        // b and c point at each other, a hangs under b
        let replies = store(vec![
            reply("a", None, "u1"),
            reply("b", Some("a"), "u1"),
            reply("c", Some("b"), "u1"),
        ]);
        replies.replies.lock().unwrap()[1].parent = Some(Thing::from((REPLY_TABLE_NAME, "c")));
        replies.replies.lock().unwrap()[0].parent = Some(Thing::from((REPLY_TABLE_NAME, "b")));
        let service = ReplyService::new(&replies, &NoPosts, &NoLikes);

        let removed = service.delete_subtree("reply:b", "u1").await.unwrap();
        assert_eq!(removed, 3);
    }

    #[tokio::test]
    async fn tree_of_missing_post_is_not_found() {
        let replies = store(vec![reply("a", None, "u1")]);
        let service = ReplyService::new(&replies, &NoPosts, &NoLikes);

        let err = service
            .get_tree("post:p", None, OrphanPolicy::Drop)
            .await
            .unwrap_err();
        assert!(matches!(err.error, AppError::EntityFailIdNotFound { .. }));
    }
}
