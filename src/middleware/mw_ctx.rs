use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Duration;

use crate::config::AppConfig;
use crate::database::client::Database;
use crate::services::reply_tree::OrphanPolicy;
use crate::utils::jwt::JWT;

pub struct CtxState {
    pub db: Database,
    pub jwt: JWT,
    pub orphan_policy: OrphanPolicy,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("orphan_policy", &self.orphan_policy)
            .finish_non_exhaustive()
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    let ctx_state = CtxState {
        db,
        jwt: JWT::new(config.jwt_secret.clone(), Duration::days(1)),
        orphan_policy: config.orphan_policy,
    };
    Arc::new(ctx_state)
}
