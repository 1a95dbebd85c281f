use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::entities::like::LikeToggle;
use crate::middleware::bearer_auth::BearerAuth;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::models::view::reply::ReplyView;
use crate::services::reply_service::{ReplyInput, ReplyService, ReplyTreeView};
use crate::services::reply_tree::{OrphanPolicy, ReplyNode};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/replies", post(create_reply))
        .route("/api/replies/post/:post_id", get(get_post_replies))
        .route("/api/replies/:reply_id", delete(delete_reply))
        .route("/api/replies/:reply_id/like", post(like))
}

#[derive(Debug, Deserialize)]
pub struct GetRepliesQuery {
    pub orphans: Option<OrphanPolicy>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteReplyResponse {
    pub deleted: u32,
}

async fn get_post_replies(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
    Query(query): Query<GetRepliesQuery>,
) -> CtxResult<Json<ReplyTreeView>> {
    let orphans = query.orphans.unwrap_or(state.orphan_policy);
    let tree = ReplyService::new(&state.db.replies, &state.db.posts, &state.db.likes)
        .get_tree(&post_id, ctx.viewer_id(), orphans)
        .await
        .map_err(|e| ctx.to_ctx_error(e.error))?;
    Ok(Json(tree))
}

async fn create_reply(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Json(body): Json<ReplyInput>,
) -> CtxResult<Json<ReplyNode<ReplyView>>> {
    let reply = ReplyService::new(&state.db.replies, &state.db.posts, &state.db.likes)
        .create(&auth_data.user_thing_id(), body)
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(reply))
}

async fn delete_reply(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(reply_id): Path<String>,
) -> CtxResult<Json<DeleteReplyResponse>> {
    let deleted = ReplyService::new(&state.db.replies, &state.db.posts, &state.db.likes)
        .delete_subtree(&reply_id, &auth_data.user_thing_id())
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(DeleteReplyResponse { deleted }))
}

async fn like(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(reply_id): Path<String>,
) -> CtxResult<Json<LikeToggle>> {
    let toggle = ReplyService::new(&state.db.replies, &state.db.posts, &state.db.likes)
        .like(&reply_id, &auth_data.user_thing_id())
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(toggle))
}
