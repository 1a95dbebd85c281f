use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::debug;
use uuid::Uuid;

use crate::entities::user::UserRole;
use crate::middleware::{
    ctx::Ctx,
    error::{AppError, CtxResult},
    mw_ctx::CtxState,
};

/// Required authentication: the identity provider's token must be present
/// and valid, otherwise the request is rejected with 401.
pub struct BearerAuth {
    pub user_id: String,
    pub role: UserRole,
    pub ctx: Ctx,
}

impl BearerAuth {
    /// Admin-only endpoints reject every other role with 403.
    pub fn require_admin(&self) -> CtxResult<()> {
        match self.role {
            UserRole::Admin => Ok(()),
            UserRole::User => Err(self.ctx.to_ctx_error(AppError::Forbidden)),
        }
    }

    pub fn user_thing_id(&self) -> String {
        match self.user_id.find(":") {
            None => self.user_id.clone(),
            Some(ind) => (&self.user_id[ind + 1..]).to_string(),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for BearerAuth {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state): State<Arc<CtxState>> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(token) => match app_state.jwt.decode(token.token()) {
                Ok(claims) => Ok(BearerAuth {
                    user_id: claims.auth.clone(),
                    role: claims.role,
                    ctx: Ctx::new(Ok(claims.auth), Uuid::new_v4()),
                }),
                Err(err) => {
                    debug!("rejected bearer token: {err}");
                    Err(StatusCode::UNAUTHORIZED)
                }
            },
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }
}
