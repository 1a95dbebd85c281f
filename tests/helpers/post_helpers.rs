use anonblog_server::entities::post::Post;
use anonblog_server::models::view::post::PostView;
use axum_test::{TestResponse, TestServer};
use fake::{faker, Fake};
use serde_json::json;

use super::TestUser;

#[allow(dead_code)]
pub async fn create_post(server: &TestServer, user: &TestUser, body: serde_json::Value) -> TestResponse {
    server
        .post("/api/posts")
        .json(&body)
        .add_header("Authorization", user.bearer())
        .await
}

#[allow(dead_code)]
pub async fn create_fake_post(server: &TestServer, user: &TestUser) -> Post {
    let title: String = faker::lorem::en::Sentence(3..6).fake();
    let content: String = faker::lorem::en::Paragraph(2..4).fake();
    let response = create_post(
        server,
        user,
        json!({ "title": title, "content": content, "tags": ["rust"] }),
    )
    .await;
    response.assert_status_success();
    response.json::<Post>()
}

#[allow(dead_code)]
pub async fn get_post(server: &TestServer, post_id: &str, user: Option<&TestUser>) -> TestResponse {
    let request = server.get(&format!("/api/posts/{post_id}"));
    match user {
        Some(user) => request.add_header("Authorization", user.bearer()).await,
        None => request.await,
    }
}

#[allow(dead_code)]
pub async fn get_post_view(server: &TestServer, post_id: &str) -> PostView {
    let response = get_post(server, post_id, None).await;
    response.assert_status_ok();
    response.json::<PostView>()
}
