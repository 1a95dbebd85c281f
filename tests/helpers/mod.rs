pub mod post_helpers;
pub mod reply_helpers;
pub mod test_with_server;

use anonblog_server::entities::user::UserRole;
use anonblog_server::middleware::mw_ctx::CtxState;
use fake::{faker, Fake};

#[allow(dead_code)]
pub struct TestUser {
    pub id: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Users live in the identity provider, a valid token is all the server needs.
#[allow(dead_code)]
pub fn create_fake_login_test_user(ctx_state: &CtxState) -> TestUser {
    create_fake_login_user_with_role(ctx_state, UserRole::User)
}

#[allow(dead_code)]
pub fn create_fake_login_test_admin(ctx_state: &CtxState) -> TestUser {
    create_fake_login_user_with_role(ctx_state, UserRole::Admin)
}

#[allow(dead_code)]
fn create_fake_login_user_with_role(ctx_state: &CtxState, role: UserRole) -> TestUser {
    let username: String = faker::internet::en::Username().fake();
    let id = format!(
        "{}{}",
        username.replace(|c: char| !c.is_ascii_alphanumeric(), ""),
        (1000..9999).fake::<u32>()
    );
    let token = ctx_state
        .jwt
        .create_with_role(&id, role)
        .expect("token created");
    TestUser { id, token }
}
