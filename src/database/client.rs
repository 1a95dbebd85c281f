use std::sync::Arc;

use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repositories::bookmark::BookmarksRepository;
use crate::database::repositories::like::LikesRepository;
use crate::database::repositories::post::PostsRepository;
use crate::database::repositories::reply::RepliesRepository;
use crate::database::repositories::report::ReportsRepository;
use crate::middleware::error::AppResult;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

/// The process-wide store handle. Created once at start-up and shared
/// through `CtxState`.
#[derive(Debug)]
pub struct Database {
    pub client: Arc<Db>,
    pub posts: PostsRepository,
    pub replies: RepliesRepository,
    pub likes: LikesRepository,
    pub bookmarks: BookmarksRepository,
    pub reports: ReportsRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> AppResult<Self> {
        info!("->> connecting DB config = {:?}", config);
        let conn = connect(config.url).await?;

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password }).await?;
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await?;

        let version = conn.version().await?;
        info!("->> connected DB version: {version}");

        let client = Arc::new(conn);
        Ok(Self {
            posts: PostsRepository::new(client.clone()),
            replies: RepliesRepository::new(client.clone()),
            likes: LikesRepository::new(client.clone()),
            bookmarks: BookmarksRepository::new(client.clone()),
            reports: ReportsRepository::new(client.clone()),
            client,
        })
    }

    pub async fn run_migrations(&self) -> AppResult<()> {
        self.posts.mutate_db().await?;
        self.replies.mutate_db().await?;
        self.likes.mutate_db().await?;
        self.bookmarks.mutate_db().await?;
        self.reports.mutate_db().await?;
        info!("->> migrations applied");
        Ok(())
    }
}
