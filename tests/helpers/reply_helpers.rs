use anonblog_server::models::view::reply::ReplyView;
use anonblog_server::routes::reply::DeleteReplyResponse;
use anonblog_server::services::reply_service::ReplyTreeView;
use anonblog_server::services::reply_tree::ReplyNode;
use axum_test::{TestResponse, TestServer};
use fake::{faker, Fake};
use serde_json::json;

use super::TestUser;

#[allow(dead_code)]
pub async fn create_reply(
    server: &TestServer,
    user: &TestUser,
    post_id: &str,
    parent_reply_id: Option<&str>,
    content: &str,
) -> TestResponse {
    server
        .post("/api/replies")
        .json(&json!({
            "post_id": post_id,
            "parent_reply_id": parent_reply_id,
            "content": content,
        }))
        .add_header("Authorization", user.bearer())
        .await
}

/// Creates a reply with generated content and returns its raw id.
#[allow(dead_code)]
pub async fn create_fake_reply(
    server: &TestServer,
    user: &TestUser,
    post_id: &str,
    parent_reply_id: Option<&str>,
) -> String {
    let content: String = faker::lorem::en::Sentence(3..8).fake();
    let response = create_reply(server, user, post_id, parent_reply_id, &content).await;
    response.assert_status_success();
    response.json::<ReplyNode<ReplyView>>().reply.id.to_raw()
}

#[allow(dead_code)]
pub async fn get_reply_tree(
    server: &TestServer,
    post_id: &str,
    user: Option<&TestUser>,
    orphans: Option<&str>,
) -> ReplyTreeView {
    let path = match orphans {
        Some(orphans) => format!("/api/replies/post/{post_id}?orphans={orphans}"),
        None => format!("/api/replies/post/{post_id}"),
    };
    let request = server.get(&path);
    let response = match user {
        Some(user) => request.add_header("Authorization", user.bearer()).await,
        None => request.await,
    };
    response.assert_status_ok();
    response.json::<ReplyTreeView>()
}

#[allow(dead_code)]
pub async fn delete_reply(server: &TestServer, user: &TestUser, reply_id: &str) -> TestResponse {
    server
        .delete(&format!("/api/replies/{reply_id}"))
        .add_header("Authorization", user.bearer())
        .await
}

#[allow(dead_code)]
pub async fn delete_reply_count(server: &TestServer, user: &TestUser, reply_id: &str) -> u32 {
    let response = delete_reply(server, user, reply_id).await;
    response.assert_status_ok();
    response.json::<DeleteReplyResponse>().deleted
}
