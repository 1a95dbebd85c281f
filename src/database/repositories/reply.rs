use crate::database::client::Db;
use crate::database::table_names::{
    LIKE_TABLE_NAME, POST_TABLE_NAME, REPLY_TABLE_NAME, USER_TABLE_NAME,
};
use crate::entities::reply::{CreateReply, Reply};
use crate::interfaces::repositories::reply::RepliesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::ViewFieldSelector;
use crate::models::view::reply::ReplyView;
use async_trait::async_trait;
use std::sync::Arc;
use surrealdb::sql::Thing;

#[derive(Debug)]
pub struct RepliesRepository {
    client: Arc<Db>,
}

impl RepliesRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {REPLY_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS belongs_to ON TABLE {REPLY_TABLE_NAME} TYPE record<{POST_TABLE_NAME}>;
    DEFINE INDEX IF NOT EXISTS belongs_to_idx ON TABLE {REPLY_TABLE_NAME} COLUMNS belongs_to;
    DEFINE FIELD IF NOT EXISTS parent ON TABLE {REPLY_TABLE_NAME} TYPE option<record<{REPLY_TABLE_NAME}>>;
    DEFINE INDEX IF NOT EXISTS parent_idx ON TABLE {REPLY_TABLE_NAME} COLUMNS parent;
    DEFINE FIELD IF NOT EXISTS created_by ON TABLE {REPLY_TABLE_NAME} TYPE record<{USER_TABLE_NAME}>;
    DEFINE FIELD IF NOT EXISTS content ON TABLE {REPLY_TABLE_NAME} TYPE string
        ASSERT string::len(string::trim($value)) > 0 AND string::len($value) <= 2000;
    DEFINE FIELD IF NOT EXISTS mentions ON TABLE {REPLY_TABLE_NAME} TYPE array<string> DEFAULT [];
    DEFINE FIELD IF NOT EXISTS likes_nr ON TABLE {REPLY_TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {REPLY_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {REPLY_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    ");
        self.client.query(sql).await?.check()?;
        Ok(())
    }
}

#[async_trait]
impl RepliesRepositoryInterface for RepliesRepository {
    async fn create(&self, data: CreateReply) -> AppResult<Reply> {
        let post = data.belongs_to.clone();
        let mut res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $reply = (CREATE ONLY {REPLY_TABLE_NAME} CONTENT $data); \
                UPDATE $post SET replies_nr += 1; \
                COMMIT TRANSACTION; \
                RETURN $reply;"
            ))
            .bind(("data", data))
            .bind(("post", post))
            .await?
            .check()?;

        let reply = res.take::<Option<Reply>>(res.num_statements() - 1)?;
        reply.ok_or(AppError::Generic {
            description: "reply was not created".to_string(),
        })
    }

    async fn get_by_id(&self, reply_id: &Thing) -> AppResult<Option<Reply>> {
        let data: Option<Reply> = self
            .client
            .select((REPLY_TABLE_NAME, reply_id.id.to_raw()))
            .await?;
        Ok(data)
    }

    async fn get_by_post(
        &self,
        post_id: &Thing,
        viewer: Option<Thing>,
    ) -> AppResult<Vec<ReplyView>> {
        let data = self
            .client
            .query(format!(
                "SELECT {} FROM {REPLY_TABLE_NAME} WHERE belongs_to=$post ORDER BY created_at ASC;",
                ReplyView::get_select_query_fields()
            ))
            .bind(("post", post_id.clone()))
            .bind(("user", viewer))
            .await?
            .take::<Vec<ReplyView>>(0)?;

        Ok(data)
    }

    async fn get_children_ids(&self, parents: Vec<Thing>) -> AppResult<Vec<Thing>> {
        let ids = self
            .client
            .query(format!(
                "SELECT VALUE id FROM {REPLY_TABLE_NAME} WHERE parent IN $parents;"
            ))
            .bind(("parents", parents))
            .await?
            .take::<Vec<Thing>>(0)?;

        Ok(ids)
    }

    async fn delete_subtree(&self, post_id: &Thing, reply_ids: Vec<Thing>) -> AppResult<u32> {
        let mut res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $removed = (DELETE {REPLY_TABLE_NAME} WHERE id IN $ids RETURN BEFORE); \
                LET $count = array::len($removed); \
                DELETE {LIKE_TABLE_NAME} WHERE out IN $ids; \
                UPDATE {POST_TABLE_NAME} SET replies_nr = math::max([0, replies_nr - $count]) WHERE id=$post; \
                COMMIT TRANSACTION; \
                RETURN $count;"
            ))
            .bind(("ids", reply_ids))
            .bind(("post", post_id.clone()))
            .await?
            .check()?;

        let count = res
            .take::<Option<i64>>(res.num_statements() - 1)?
            .unwrap_or(0) as u32;
        Ok(count)
    }
}
