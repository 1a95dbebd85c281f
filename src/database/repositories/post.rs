use crate::database::client::Db;
use crate::database::table_names::{
    BOOKMARK_TABLE_NAME, LIKE_TABLE_NAME, POST_TABLE_NAME, REPLY_TABLE_NAME, USER_TABLE_NAME,
};
use crate::entities::post::{CreatePost, Post, PostFilter, TagCount, UpdatePost};
use crate::interfaces::repositories::post::PostsRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::{Pagination, QryOrder, ViewFieldSelector};
use crate::models::view::post::PostView;
use async_trait::async_trait;
use std::sync::Arc;
use surrealdb::sql::Thing;

#[derive(Debug)]
pub struct PostsRepository {
    client: Arc<Db>,
}

impl PostsRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {POST_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS created_by ON TABLE {POST_TABLE_NAME} TYPE record<{USER_TABLE_NAME}>;
    DEFINE INDEX IF NOT EXISTS created_by_idx ON TABLE {POST_TABLE_NAME} COLUMNS created_by;
    DEFINE FIELD IF NOT EXISTS title ON TABLE {POST_TABLE_NAME} TYPE string
        ASSERT string::len(string::trim($value)) > 0 AND string::len($value) <= 200;
    DEFINE FIELD IF NOT EXISTS content ON TABLE {POST_TABLE_NAME} TYPE string ASSERT string::len(string::trim($value)) > 0;
    DEFINE FIELD IF NOT EXISTS excerpt ON TABLE {POST_TABLE_NAME} TYPE string DEFAULT '';
    DEFINE FIELD IF NOT EXISTS tags ON TABLE {POST_TABLE_NAME} TYPE array<string> DEFAULT [];
    DEFINE INDEX IF NOT EXISTS tags_idx ON TABLE {POST_TABLE_NAME} COLUMNS tags;
    DEFINE FIELD IF NOT EXISTS mentions ON TABLE {POST_TABLE_NAME} TYPE array<string> DEFAULT [];
    DEFINE FIELD IF NOT EXISTS reading_time ON TABLE {POST_TABLE_NAME} TYPE int DEFAULT 1;
    DEFINE FIELD IF NOT EXISTS likes_nr ON TABLE {POST_TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS replies_nr ON TABLE {POST_TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS views_nr ON TABLE {POST_TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {POST_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {POST_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    DEFINE INDEX IF NOT EXISTS created_at_idx ON TABLE {POST_TABLE_NAME} COLUMNS created_at;
    ");
        self.client.query(sql).await?.check()?;
        Ok(())
    }
}

#[async_trait]
impl PostsRepositoryInterface for PostsRepository {
    async fn create(&self, data: CreatePost) -> AppResult<Post> {
        let post: Option<Post> = self.client.create(POST_TABLE_NAME).content(data).await?;
        post.ok_or(AppError::Generic {
            description: "post was not created".to_string(),
        })
    }

    async fn get_by_id(&self, post_id: &Thing) -> AppResult<Option<Post>> {
        let post: Option<Post> = self
            .client
            .select((POST_TABLE_NAME, post_id.id.to_raw()))
            .await?;
        Ok(post)
    }

    async fn get_view_by_id(
        &self,
        post_id: &Thing,
        viewer: Option<Thing>,
    ) -> AppResult<Option<PostView>> {
        let post = self
            .client
            .query(format!(
                "SELECT {} FROM $post;",
                PostView::get_select_query_fields()
            ))
            .bind(("post", post_id.clone()))
            .bind(("user", viewer))
            .await?
            .take::<Vec<PostView>>(0)?;
        Ok(post.into_iter().next())
    }

    async fn list(
        &self,
        filter: PostFilter,
        viewer: Option<Thing>,
        pagination: Pagination,
    ) -> AppResult<Vec<PostView>> {
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC).to_string();
        let mut conditions = vec![];
        if filter.tag.is_some() {
            conditions.push("tags CONTAINS $tag");
        }
        if filter.author.is_some() {
            conditions.push("created_by=$author");
        }
        if filter.search.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(title), $search) \
                OR string::contains(string::lowercase(content), $search))",
            );
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let posts = self
            .client
            .query(format!(
                "SELECT {} FROM {POST_TABLE_NAME} {where_clause} ORDER BY created_at {order_dir} LIMIT $limit START $start;",
                PostView::get_select_query_fields()
            ))
            .bind(("tag", filter.tag))
            .bind(("author", filter.author))
            .bind(("search", filter.search))
            .bind(("user", viewer))
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await?
            .take::<Vec<PostView>>(0)?;
        Ok(posts)
    }

    async fn trending_tags(&self, limit: u16) -> AppResult<Vec<TagCount>> {
        let tags = self
            .client
            .query(format!(
                "SELECT tags AS tag, posts_nr FROM ( \
                    SELECT tags, count() AS posts_nr FROM {POST_TABLE_NAME} \
                    WHERE array::len(tags) > 0 SPLIT tags GROUP BY tags \
                ) ORDER BY posts_nr DESC, tag ASC LIMIT $limit;"
            ))
            .bind(("limit", limit))
            .await?
            .take::<Vec<TagCount>>(0)?;
        Ok(tags)
    }

    async fn related(
        &self,
        post_id: &Thing,
        tags: Vec<String>,
        viewer: Option<Thing>,
        limit: u16,
    ) -> AppResult<Vec<PostView>> {
        let posts = self
            .client
            .query(format!(
                "SELECT {} FROM {POST_TABLE_NAME} WHERE id!=$post AND tags CONTAINSANY $tags \
                ORDER BY likes_nr DESC, created_at DESC LIMIT $limit;",
                PostView::get_select_query_fields()
            ))
            .bind(("post", post_id.clone()))
            .bind(("tags", tags))
            .bind(("user", viewer))
            .bind(("limit", limit))
            .await?
            .take::<Vec<PostView>>(0)?;
        Ok(posts)
    }

    async fn update(&self, post_id: &Thing, data: UpdatePost) -> AppResult<Post> {
        let post: Option<Post> = self
            .client
            .update((POST_TABLE_NAME, post_id.id.to_raw()))
            .merge(data)
            .await?;
        post.ok_or(AppError::EntityFailIdNotFound {
            ident: post_id.to_raw(),
        })
    }

    async fn increment_views(&self, post_id: &Thing) -> AppResult<()> {
        self.client
            .query("UPDATE $post SET views_nr += 1;")
            .bind(("post", post_id.clone()))
            .await?
            .check()?;
        Ok(())
    }

    async fn delete(&self, post_id: &Thing) -> AppResult<()> {
        self.client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $replies = (SELECT VALUE id FROM {REPLY_TABLE_NAME} WHERE belongs_to=$post); \
                DELETE {LIKE_TABLE_NAME} WHERE out=$post OR out IN $replies; \
                DELETE {BOOKMARK_TABLE_NAME} WHERE out=$post; \
                DELETE {REPLY_TABLE_NAME} WHERE belongs_to=$post; \
                DELETE $post; \
                COMMIT TRANSACTION;"
            ))
            .bind(("post", post_id.clone()))
            .await?
            .check()?;
        Ok(())
    }
}
