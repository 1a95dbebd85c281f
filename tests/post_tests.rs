mod helpers;

use crate::helpers::create_fake_login_test_user;
use crate::helpers::post_helpers::{create_fake_post, create_post, get_post, get_post_view};
use crate::helpers::reply_helpers::{create_fake_reply, get_reply_tree};
use anonblog_server::entities::post::Post;
use anonblog_server::models::view::post::PostView;
use anonblog_server::routes::posts::DeletePostResponse;
use serde_json::json;

test_with_server!(create_post_derives_fields, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let words = vec!["word"; 450].join(" ");
    let response = create_post(
        &server,
        &user,
        json!({
            "title": "  Hello @Reader  ",
            "content": format!("{words} thanks @writer_1"),
            "tags": [" Rust ", "rust", "WEB", ""]
        }),
    )
    .await;
    response.assert_status_ok();

    let post = response.json::<Post>();
    assert_eq!(post.title, "Hello @Reader");
    assert_eq!(post.tags, vec!["rust".to_string(), "web".to_string()]);
    assert_eq!(
        post.mentions,
        vec!["reader".to_string(), "writer_1".to_string()]
    );
    assert_eq!(post.reading_time, 3);
    assert!(post.excerpt.ends_with("..."));
    assert!(post.excerpt.chars().count() <= 203);
    assert_eq!(post.created_by.id.to_raw(), user.id);
    assert_eq!(post.replies_nr, 0);
    assert_eq!(post.likes_nr, 0);
});

test_with_server!(create_post_validates_input, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);

    create_post(&server, &user, json!({ "title": "   ", "content": "body" }))
        .await
        .assert_status_bad_request();
    create_post(&server, &user, json!({ "title": "x".repeat(201), "content": "body" }))
        .await
        .assert_status_bad_request();
    create_post(&server, &user, json!({ "title": "title", "content": "  " }))
        .await
        .assert_status_bad_request();
    create_post(
        &server,
        &user,
        json!({ "title": "title", "content": "body", "tags": ["a", "b", "c", "d", "e", "f"] }),
    )
    .await
    .assert_status_bad_request();
    create_post(
        &server,
        &user,
        json!({ "title": "title", "content": "body", "tags": ["no spaces allowed"] }),
    )
    .await
    .assert_status_bad_request();

    server
        .post("/api/posts")
        .json(&json!({ "title": "title", "content": "body" }))
        .await
        .assert_status_unauthorized();
});

test_with_server!(get_post_counts_views, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &user).await;
    let post_id = post.id.to_raw();

    assert_eq!(get_post_view(&server, &post_id).await.views_nr, 1);
    assert_eq!(get_post_view(&server, &post_id).await.views_nr, 2);

    get_post(&server, "post:not_a_real_id", None)
        .await
        .assert_status_not_found();
});

test_with_server!(list_posts_filters_by_tag, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    create_post(&server, &user, json!({ "title": "one", "content": "body", "tags": ["rust"] }))
        .await
        .assert_status_ok();
    create_post(&server, &user, json!({ "title": "two", "content": "body", "tags": ["go"] }))
        .await
        .assert_status_ok();
    create_post(&server, &user, json!({ "title": "three", "content": "body", "tags": ["Rust"] }))
        .await
        .assert_status_ok();

    let all = server.get("/api/posts").await.json::<Vec<PostView>>();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].title, "three");

    let rust = server.get("/api/posts?tag=RUST").await.json::<Vec<PostView>>();
    assert_eq!(rust.len(), 2);
    assert!(rust.iter().all(|p| p.tags.contains(&"rust".to_string())));

    let page = server
        .get("/api/posts?start=1&count=1&order_dir=ASC")
        .await
        .json::<Vec<PostView>>();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "two");
});

test_with_server!(update_post_by_author_only, |server, ctx_state, config| {
    let author = create_fake_login_test_user(&ctx_state);
    let other = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &author).await;
    let post_id = post.id.to_raw();

    server
        .put(&format!("/api/posts/{post_id}"))
        .json(&json!({ "title": "hijacked" }))
        .add_header("Authorization", other.bearer())
        .await
        .assert_status_forbidden();

    let response = server
        .put(&format!("/api/posts/{post_id}"))
        .json(&json!({ "content": "new body for @someone", "tags": ["Edited"] }))
        .add_header("Authorization", author.bearer())
        .await;
    response.assert_status_ok();
    let updated = response.json::<Post>();
    assert_eq!(updated.title, post.title);
    assert_eq!(updated.content, "new body for @someone");
    assert_eq!(updated.excerpt, "new body for @someone");
    assert_eq!(updated.tags, vec!["edited".to_string()]);
    assert_eq!(updated.mentions, vec!["someone".to_string()]);
});

test_with_server!(update_post_rejects_blank_title, |server, ctx_state, config| {
    let author = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &author).await;
    let post_id = post.id.to_raw();

    server
        .put(&format!("/api/posts/{post_id}"))
        .json(&json!({ "title": "   " }))
        .add_header("Authorization", author.bearer())
        .await
        .assert_status_bad_request();
    server
        .put(&format!("/api/posts/{post_id}"))
        .json(&json!({ "content": " \n " }))
        .add_header("Authorization", author.bearer())
        .await
        .assert_status_bad_request();

    assert_eq!(get_post_view(&server, &post_id).await.title, post.title);

    let response = server
        .put(&format!("/api/posts/{post_id}"))
        .json(&json!({ "title": "  Renamed  " }))
        .add_header("Authorization", author.bearer())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Post>().title, "Renamed");
});

test_with_server!(delete_post_removes_replies, |server, ctx_state, config| {
    let author = create_fake_login_test_user(&ctx_state);
    let other = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &author).await;
    let post_id = post.id.to_raw();

    let a = create_fake_reply(&server, &other, &post_id, None).await;
    create_fake_reply(&server, &author, &post_id, Some(&a)).await;
    assert_eq!(get_reply_tree(&server, &post_id, None, None).await.total, 2);

    server
        .delete(&format!("/api/posts/{post_id}"))
        .add_header("Authorization", other.bearer())
        .await
        .assert_status_forbidden();

    let response = server
        .delete(&format!("/api/posts/{post_id}"))
        .add_header("Authorization", author.bearer())
        .await;
    response.assert_status_ok();
    assert!(response.json::<DeletePostResponse>().deleted);

    get_post(&server, &post_id, None).await.assert_status_not_found();

    let replies: Vec<serde_json::Value> = ctx_state
        .db
        .client
        .query(format!("SELECT * FROM reply WHERE belongs_to={post_id};"))
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert!(replies.is_empty());
});

test_with_server!(health_reports_version, |server, ctx_state, config| {
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.text().starts_with('v'));
});
