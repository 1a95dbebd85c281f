use crate::database::client::Db;
use crate::database::table_names::{BOOKMARK_TABLE_NAME, POST_TABLE_NAME, USER_TABLE_NAME};
use crate::interfaces::repositories::bookmark::BookmarksRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::{Pagination, QryOrder, ViewFieldSelector};
use crate::models::view::post::PostView;
use async_trait::async_trait;
use std::sync::Arc;
use surrealdb::sql::Thing;

#[derive(Debug)]
pub struct BookmarksRepository {
    client: Arc<Db>,
}

impl BookmarksRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {BOOKMARK_TABLE_NAME} TYPE RELATION IN {USER_TABLE_NAME} OUT {POST_TABLE_NAME} SCHEMAFULL PERMISSIONS NONE;
    DEFINE INDEX IF NOT EXISTS in_out_unique_idx ON {BOOKMARK_TABLE_NAME} FIELDS in, out UNIQUE;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {BOOKMARK_TABLE_NAME} TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS in_created_at_idx ON {BOOKMARK_TABLE_NAME} FIELDS in, created_at;
    ");
        self.client.query(sql).await?.check()?;
        Ok(())
    }
}

#[async_trait]
impl BookmarksRepositoryInterface for BookmarksRepository {
    async fn toggle(&self, user: Thing, post: Thing) -> AppResult<bool> {
        let mut res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $id = (SELECT id FROM {BOOKMARK_TABLE_NAME} WHERE in=$in AND out=$out)[0].id; \
                IF $id THEN DELETE $id ELSE RELATE $in->{BOOKMARK_TABLE_NAME}->$out END; \
                COMMIT TRANSACTION; \
                RETURN !$id;"
            ))
            .bind(("in", user))
            .bind(("out", post))
            .await?
            .check()?;

        let bookmarked = res.take::<Option<bool>>(res.num_statements() - 1)?;
        bookmarked.ok_or(AppError::Generic {
            description: "bookmark toggle returned no result".to_string(),
        })
    }

    async fn exists(&self, user: Thing, post: Thing) -> AppResult<bool> {
        let exists = self
            .client
            .query(format!(
                "RETURN array::len((SELECT id FROM {BOOKMARK_TABLE_NAME} WHERE in=$in AND out=$out)) > 0;"
            ))
            .bind(("in", user))
            .bind(("out", post))
            .await?
            .take::<Option<bool>>(0)?;
        Ok(exists.unwrap_or(false))
    }

    async fn list(&self, user: Thing, pagination: Pagination) -> AppResult<Vec<PostView>> {
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC).to_string();
        let posts = self
            .client
            .query(format!(
                "LET $edges = (SELECT out, created_at FROM {BOOKMARK_TABLE_NAME} WHERE in=$user \
                    ORDER BY created_at {order_dir} LIMIT $limit START $start); \
                SELECT {} FROM $edges.out;",
                PostView::get_select_query_fields()
            ))
            .bind(("user", user))
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await?
            .take::<Vec<PostView>>(1)?;
        Ok(posts)
    }

    async fn count(&self, user: Thing) -> AppResult<u32> {
        let count = self
            .client
            .query(format!(
                "RETURN array::len((SELECT id FROM {BOOKMARK_TABLE_NAME} WHERE in=$user));"
            ))
            .bind(("user", user))
            .await?
            .take::<Option<i64>>(0)?;
        Ok(count.unwrap_or(0) as u32)
    }
}
