use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::entities::like::LikeToggle;
use crate::entities::post::{Post, TagCount};
use crate::middleware::bearer_auth::BearerAuth;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::models::view::post::PostView;
use crate::services::post_service::{
    GetPostsQuery, LimitQuery, PostInput, PostService, UpdatePostInput,
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/posts", get(get_posts).post(create_post))
        .route("/api/posts/trending-tags", get(get_trending_tags))
        .route("/api/posts/tag/:tag", get(get_posts_by_tag))
        .route("/api/posts/author/:user_id", get(get_posts_by_author))
        .route(
            "/api/posts/:post_id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/posts/:post_id/like", post(like))
        .route("/api/posts/:post_id/related", get(get_related_posts))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePostResponse {
    pub deleted: bool,
}

async fn get_posts(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Query(query): Query<GetPostsQuery>,
) -> CtxResult<Json<Vec<PostView>>> {
    let posts = PostService::new(&state.db.posts, &state.db.likes)
        .list(query, ctx.viewer_id())
        .await
        .map_err(|e| ctx.to_ctx_error(e.error))?;
    Ok(Json(posts))
}

async fn get_trending_tags(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Vec<TagCount>>> {
    let tags = PostService::new(&state.db.posts, &state.db.likes)
        .trending_tags()
        .await
        .map_err(|e| ctx.to_ctx_error(e.error))?;
    Ok(Json(tags))
}

async fn get_posts_by_tag(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(tag): Path<String>,
    Query(query): Query<GetPostsQuery>,
) -> CtxResult<Json<Vec<PostView>>> {
    let posts = PostService::new(&state.db.posts, &state.db.likes)
        .list_by_tag(&tag, query, ctx.viewer_id())
        .await
        .map_err(|e| ctx.to_ctx_error(e.error))?;
    Ok(Json(posts))
}

async fn get_posts_by_author(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(user_id): Path<String>,
    Query(query): Query<GetPostsQuery>,
) -> CtxResult<Json<Vec<PostView>>> {
    let posts = PostService::new(&state.db.posts, &state.db.likes)
        .list_by_author(&user_id, query, ctx.viewer_id())
        .await
        .map_err(|e| ctx.to_ctx_error(e.error))?;
    Ok(Json(posts))
}

async fn get_related_posts(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> CtxResult<Json<Vec<PostView>>> {
    let posts = PostService::new(&state.db.posts, &state.db.likes)
        .related(&post_id, query.limit, ctx.viewer_id())
        .await
        .map_err(|e| ctx.to_ctx_error(e.error))?;
    Ok(Json(posts))
}

async fn create_post(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Json(body): Json<PostInput>,
) -> CtxResult<Json<Post>> {
    let post = PostService::new(&state.db.posts, &state.db.likes)
        .create(&auth_data.user_thing_id(), body)
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(post))
}

async fn get_post(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
) -> CtxResult<Json<PostView>> {
    let post = PostService::new(&state.db.posts, &state.db.likes)
        .get(&post_id, ctx.viewer_id())
        .await
        .map_err(|e| ctx.to_ctx_error(e.error))?;
    Ok(Json(post))
}

async fn update_post(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
    Json(body): Json<UpdatePostInput>,
) -> CtxResult<Json<Post>> {
    let post = PostService::new(&state.db.posts, &state.db.likes)
        .update(&post_id, &auth_data.user_thing_id(), body)
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(post))
}

async fn delete_post(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
) -> CtxResult<Json<DeletePostResponse>> {
    PostService::new(&state.db.posts, &state.db.likes)
        .delete(&post_id, &auth_data.user_thing_id())
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(DeletePostResponse { deleted: true }))
}

async fn like(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
) -> CtxResult<Json<LikeToggle>> {
    let toggle = PostService::new(&state.db.posts, &state.db.likes)
        .like(&post_id, &auth_data.user_thing_id())
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(toggle))
}
