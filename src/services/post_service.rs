use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use tracing::info;
use validator::Validate;

use crate::{
    database::table_names::{POST_TABLE_NAME, USER_TABLE_NAME},
    entities::{
        like::LikeToggle,
        post::{CreatePost, Post, PostFilter, TagCount, UpdatePost},
    },
    interfaces::repositories::{like::LikesRepositoryInterface, post::PostsRepositoryInterface},
    middleware::{
        error::{AppError, CtxResult},
        utils::{
            db_utils::{Pagination, QryOrder},
            string_utils::get_str_thing,
        },
    },
    models::view::post::PostView,
    utils::{
        mentions::extract_mentions,
        text::{generate_excerpt, reading_time, EXCERPT_MAX_LEN},
        validate_utils::{normalize_tags, trim_string, validate_not_blank, validate_tags},
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct GetPostsQuery {
    pub tag: Option<String>,
    pub search: Option<String>,
    pub order_dir: Option<QryOrder>,
    pub start: Option<u32>,
    pub count: Option<u16>,
}

impl GetPostsQuery {
    fn pagination(&self) -> Pagination {
        Pagination {
            order_dir: self.order_dir,
            count: self.count.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
            start: self.start.unwrap_or(0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u16>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct PostInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
    #[serde(default)]
    #[validate(
        length(max = 5, message = "Max 5 tags"),
        custom(function = "validate_tags")
    )]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdatePostInput {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1 to 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: Option<String>,
    #[validate(
        length(max = 5, message = "Max 5 tags"),
        custom(function = "validate_tags")
    )]
    pub tags: Option<Vec<String>>,
}

const DEFAULT_PAGE_SIZE: u16 = 20;
const MAX_PAGE_SIZE: u16 = 100;
const TRENDING_TAGS: u16 = 20;
const RELATED_POSTS: u16 = 4;
const MAX_RELATED_POSTS: u16 = 20;

pub struct PostService<'a, P, L>
where
    P: PostsRepositoryInterface,
    L: LikesRepositoryInterface,
{
    posts_repository: &'a P,
    likes_repository: &'a L,
}

impl<'a, P, L> PostService<'a, P, L>
where
    P: PostsRepositoryInterface,
    L: LikesRepositoryInterface,
{
    pub fn new(posts_repository: &'a P, likes_repository: &'a L) -> Self {
        Self {
            posts_repository,
            likes_repository,
        }
    }

    pub async fn create(&self, user_id: &str, data: PostInput) -> CtxResult<Post> {
        data.validate()?;

        let content = data.content.trim().to_string();
        let post = self
            .posts_repository
            .create(CreatePost {
                created_by: Thing::from((USER_TABLE_NAME, user_id)),
                excerpt: generate_excerpt(&content, EXCERPT_MAX_LEN),
                reading_time: reading_time(&content),
                mentions: extract_mentions(&format!("{} {}", data.title, content)),
                tags: normalize_tags(data.tags),
                title: data.title,
                content,
            })
            .await?;

        info!(post = %post.id, "post created");
        Ok(post)
    }

    /// Reads a post and counts the read as a view.
    pub async fn get(&self, post_id: &str, viewer_id: Option<&str>) -> CtxResult<PostView> {
        let post_thing = get_str_thing(post_id, POST_TABLE_NAME)?;
        let not_found = || AppError::EntityFailIdNotFound {
            ident: post_id.to_string(),
        };

        self.posts_repository
            .get_by_id(&post_thing)
            .await?
            .ok_or_else(not_found)?;
        self.posts_repository.increment_views(&post_thing).await?;

        let viewer = viewer_id.map(|id| Thing::from((USER_TABLE_NAME, id)));
        let post = self
            .posts_repository
            .get_view_by_id(&post_thing, viewer)
            .await?
            .ok_or_else(not_found)?;
        Ok(post)
    }

    pub async fn list(&self, query: GetPostsQuery, viewer_id: Option<&str>) -> CtxResult<Vec<PostView>> {
        let filter = PostFilter {
            tag: query.tag.as_deref().and_then(normalize_filter),
            search: query.search.as_deref().and_then(normalize_filter),
            author: None,
        };
        self.list_filtered(filter, &query, viewer_id).await
    }

    pub async fn list_by_tag(
        &self,
        tag: &str,
        query: GetPostsQuery,
        viewer_id: Option<&str>,
    ) -> CtxResult<Vec<PostView>> {
        let filter = PostFilter {
            tag: Some(normalize_filter(tag).ok_or(AppError::Generic {
                description: "Tag is required".to_string(),
            })?),
            ..Default::default()
        };
        self.list_filtered(filter, &query, viewer_id).await
    }

    /// `author_id` is the user's record key, with or without the table prefix.
    pub async fn list_by_author(
        &self,
        author_id: &str,
        query: GetPostsQuery,
        viewer_id: Option<&str>,
    ) -> CtxResult<Vec<PostView>> {
        let author = if author_id.contains(':') {
            get_str_thing(author_id, USER_TABLE_NAME)?
        } else {
            Thing::from((USER_TABLE_NAME, author_id))
        };
        let filter = PostFilter {
            author: Some(author),
            ..Default::default()
        };
        self.list_filtered(filter, &query, viewer_id).await
    }

    pub async fn trending_tags(&self) -> CtxResult<Vec<TagCount>> {
        let tags = self.posts_repository.trending_tags(TRENDING_TAGS).await?;
        Ok(tags)
    }

    /// Posts sharing a tag with `post_id`. A post without tags has none.
    pub async fn related(
        &self,
        post_id: &str,
        limit: Option<u16>,
        viewer_id: Option<&str>,
    ) -> CtxResult<Vec<PostView>> {
        let post_thing = get_str_thing(post_id, POST_TABLE_NAME)?;
        let post = self
            .posts_repository
            .get_by_id(&post_thing)
            .await?
            .ok_or(AppError::EntityFailIdNotFound {
                ident: post_id.to_string(),
            })?;

        if post.tags.is_empty() {
            return Ok(vec![]);
        }

        let limit = limit.unwrap_or(RELATED_POSTS).clamp(1, MAX_RELATED_POSTS);
        let viewer = viewer_id.map(|id| Thing::from((USER_TABLE_NAME, id)));
        let posts = self
            .posts_repository
            .related(&post.id, post.tags, viewer, limit)
            .await?;
        Ok(posts)
    }

    async fn list_filtered(
        &self,
        filter: PostFilter,
        query: &GetPostsQuery,
        viewer_id: Option<&str>,
    ) -> CtxResult<Vec<PostView>> {
        let viewer = viewer_id.map(|id| Thing::from((USER_TABLE_NAME, id)));
        let posts = self
            .posts_repository
            .list(filter, viewer, query.pagination())
            .await?;
        Ok(posts)
    }

    pub async fn update(&self, post_id: &str, user_id: &str, data: UpdatePostInput) -> CtxResult<Post> {
        data.validate()?;
        let post = self.get_owned(post_id, user_id).await?;

        let content = data.content.map(|c| c.trim().to_string());
        let title = data.title.map(|t| t.trim().to_string());
        let mentions = if title.is_some() || content.is_some() {
            let text = format!(
                "{} {}",
                title.as_deref().unwrap_or(&post.title),
                content.as_deref().unwrap_or(&post.content)
            );
            Some(extract_mentions(&text))
        } else {
            None
        };

        let update = UpdatePost {
            excerpt: content.as_deref().map(|c| generate_excerpt(c, EXCERPT_MAX_LEN)),
            reading_time: content.as_deref().map(reading_time),
            tags: data.tags.map(normalize_tags),
            mentions,
            title,
            content,
        };

        let post = self.posts_repository.update(&post.id, update).await?;
        Ok(post)
    }

    /// Removes the post with all of its replies.
    pub async fn delete(&self, post_id: &str, user_id: &str) -> CtxResult<()> {
        let post = self.get_owned(post_id, user_id).await?;
        self.posts_repository.delete(&post.id).await?;
        info!(post = %post.id, "post deleted");
        Ok(())
    }

    pub async fn like(&self, post_id: &str, user_id: &str) -> CtxResult<LikeToggle> {
        let post_thing = get_str_thing(post_id, POST_TABLE_NAME)?;
        let post = self
            .posts_repository
            .get_by_id(&post_thing)
            .await?
            .ok_or(AppError::EntityFailIdNotFound {
                ident: post_id.to_string(),
            })?;

        let toggle = self
            .likes_repository
            .toggle(Thing::from((USER_TABLE_NAME, user_id)), post.id)
            .await?;
        Ok(toggle)
    }

    async fn get_owned(&self, post_id: &str, user_id: &str) -> CtxResult<Post> {
        let post_thing = get_str_thing(post_id, POST_TABLE_NAME)?;
        let post = self
            .posts_repository
            .get_by_id(&post_thing)
            .await?
            .ok_or(AppError::EntityFailIdNotFound {
                ident: post_id.to_string(),
            })?;

        if post.created_by != Thing::from((USER_TABLE_NAME, user_id)) {
            return Err(AppError::Forbidden.into());
        }
        Ok(post)
    }
}

fn normalize_filter(value: &str) -> Option<String> {
    Some(value.trim().to_lowercase()).filter(|v| !v.is_empty())
}
