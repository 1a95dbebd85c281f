use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::entities::bookmark::BookmarkStatus;
use crate::middleware::bearer_auth::BearerAuth;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::services::bookmark_service::{BookmarkPage, BookmarkService, GetBookmarksQuery};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/bookmarks", get(get_bookmarks))
        .route("/api/bookmarks/:post_id", post(toggle_bookmark))
        .route("/api/bookmarks/check/:post_id", get(check_bookmark))
}

async fn toggle_bookmark(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
) -> CtxResult<Json<BookmarkStatus>> {
    let status = BookmarkService::new(&state.db.bookmarks, &state.db.posts)
        .toggle(&post_id, &auth_data.user_thing_id())
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(status))
}

async fn get_bookmarks(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Query(query): Query<GetBookmarksQuery>,
) -> CtxResult<Json<BookmarkPage>> {
    let page = BookmarkService::new(&state.db.bookmarks, &state.db.posts)
        .list(&auth_data.user_thing_id(), query)
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(page))
}

async fn check_bookmark(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
) -> CtxResult<Json<BookmarkStatus>> {
    let status = BookmarkService::new(&state.db.bookmarks, &state.db.posts)
        .check(&post_id, &auth_data.user_thing_id())
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(status))
}
