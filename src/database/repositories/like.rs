use crate::database::client::Db;
use crate::database::table_names::{
    LIKE_TABLE_NAME, POST_TABLE_NAME, REPLY_TABLE_NAME, USER_TABLE_NAME,
};
use crate::entities::like::LikeToggle;
use crate::interfaces::repositories::like::LikesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;
use surrealdb::sql::Thing;

#[derive(Debug)]
pub struct LikesRepository {
    client: Arc<Db>,
}

impl LikesRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {LIKE_TABLE_NAME} TYPE RELATION IN {USER_TABLE_NAME} OUT {POST_TABLE_NAME}|{REPLY_TABLE_NAME} SCHEMAFULL PERMISSIONS NONE;
    DEFINE INDEX IF NOT EXISTS in_out_unique_idx ON {LIKE_TABLE_NAME} FIELDS in, out UNIQUE;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {LIKE_TABLE_NAME} TYPE datetime DEFAULT time::now();
    ");
        self.client.query(sql).await?.check()?;
        Ok(())
    }
}

#[async_trait]
impl LikesRepositoryInterface for LikesRepository {
    async fn toggle(&self, user: Thing, out: Thing) -> AppResult<LikeToggle> {
        let mut res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $before = array::len((SELECT id FROM {LIKE_TABLE_NAME} WHERE out=$out)); \
                LET $id = (SELECT id FROM {LIKE_TABLE_NAME} WHERE in=$in AND out=$out)[0].id; \
                IF $id THEN DELETE $id ELSE RELATE $in->{LIKE_TABLE_NAME}->$out END; \
                LET $count = IF $id THEN math::max([$before - 1, 0]) ELSE $before + 1 END; \
                UPDATE $out SET likes_nr=$count; \
                COMMIT TRANSACTION; \
                RETURN {{ liked: !$id, likes_count: $count }};"
            ))
            .bind(("in", user))
            .bind(("out", out))
            .await?
            .check()?;

        let toggle = res.take::<Option<LikeToggle>>(res.num_statements() - 1)?;
        toggle.ok_or(AppError::Generic {
            description: "like toggle returned no result".to_string(),
        })
    }
}
