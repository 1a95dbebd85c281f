use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

use super::error::{AppError, AppResult, CtxError};
use crate::middleware::mw_ctx::CtxState;

/// Per-request context. The viewer is optional: read endpoints accept
/// anonymous requests and only use the viewer for `has_liked` flags.
#[derive(Clone, Debug)]
pub struct Ctx {
    result_user_id: AppResult<String>,
    req_id: Uuid,
}

impl Ctx {
    pub fn new(result_user_id: AppResult<String>, req_id: Uuid) -> Self {
        Self {
            result_user_id,
            req_id,
        }
    }

    /// Record key of the authenticated viewer, if any.
    pub fn viewer_id(&self) -> Option<&str> {
        self.result_user_id
            .as_deref()
            .ok()
            .map(|id| id.split_once(':').map_or(id, |(_, key)| key))
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            req_id: self.req_id,
            error,
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state): State<Arc<CtxState>> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let user_id = match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(token) => app_state
                .jwt
                .decode(token.token())
                .map(|claims| claims.auth),
            None => Err(AppError::AuthFailNoToken),
        };

        Ok(Ctx::new(user_id, Uuid::new_v4()))
    }
}
