use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use tracing::info;

use crate::{
    database::table_names::{POST_TABLE_NAME, USER_TABLE_NAME},
    entities::bookmark::BookmarkStatus,
    interfaces::repositories::{
        bookmark::BookmarksRepositoryInterface, post::PostsRepositoryInterface,
    },
    middleware::{
        error::{AppError, CtxResult},
        utils::{
            db_utils::{Pagination, QryOrder},
            string_utils::get_str_thing,
        },
    },
    models::view::post::PostView,
};

#[derive(Debug, Default, Deserialize)]
pub struct GetBookmarksQuery {
    pub order_dir: Option<QryOrder>,
    pub start: Option<u32>,
    pub count: Option<u16>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BookmarkPage {
    pub posts: Vec<PostView>,
    /// All bookmarks of the user, not only this page.
    pub total: u32,
}

const DEFAULT_PAGE_SIZE: u16 = 10;
const MAX_PAGE_SIZE: u16 = 100;

pub struct BookmarkService<'a, B, P>
where
    B: BookmarksRepositoryInterface,
    P: PostsRepositoryInterface,
{
    bookmarks_repository: &'a B,
    posts_repository: &'a P,
}

impl<'a, B, P> BookmarkService<'a, B, P>
where
    B: BookmarksRepositoryInterface,
    P: PostsRepositoryInterface,
{
    pub fn new(bookmarks_repository: &'a B, posts_repository: &'a P) -> Self {
        Self {
            bookmarks_repository,
            posts_repository,
        }
    }

    pub async fn toggle(&self, post_id: &str, user_id: &str) -> CtxResult<BookmarkStatus> {
        let post_thing = get_str_thing(post_id, POST_TABLE_NAME)?;
        let post = self
            .posts_repository
            .get_by_id(&post_thing)
            .await?
            .ok_or(AppError::EntityFailIdNotFound {
                ident: post_id.to_string(),
            })?;

        let bookmarked = self
            .bookmarks_repository
            .toggle(Thing::from((USER_TABLE_NAME, user_id)), post.id.clone())
            .await?;
        info!(post = %post.id, bookmarked, "bookmark toggled");
        Ok(BookmarkStatus { bookmarked })
    }

    pub async fn check(&self, post_id: &str, user_id: &str) -> CtxResult<BookmarkStatus> {
        let post_thing = get_str_thing(post_id, POST_TABLE_NAME)?;
        let bookmarked = self
            .bookmarks_repository
            .exists(Thing::from((USER_TABLE_NAME, user_id)), post_thing)
            .await?;
        Ok(BookmarkStatus { bookmarked })
    }

    pub async fn list(&self, user_id: &str, query: GetBookmarksQuery) -> CtxResult<BookmarkPage> {
        let user = Thing::from((USER_TABLE_NAME, user_id));
        let pagination = Pagination {
            order_dir: query.order_dir,
            count: query.count.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
            start: query.start.unwrap_or(0),
        };

        let posts = self
            .bookmarks_repository
            .list(user.clone(), pagination)
            .await?;
        let total = self.bookmarks_repository.count(user).await?;
        Ok(BookmarkPage { posts, total })
    }
}
