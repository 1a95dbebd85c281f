mod helpers;

use crate::helpers::create_fake_login_test_user;
use crate::helpers::post_helpers::{create_fake_post, get_post_view};
use crate::helpers::reply_helpers::{
    create_fake_reply, delete_reply, delete_reply_count, get_reply_tree,
};
use anonblog_server::services::reply_tree::count_nodes;

test_with_server!(delete_leaf_reply, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &user).await;
    let post_id = post.id.to_raw();

    let a = create_fake_reply(&server, &user, &post_id, None).await;
    let b = create_fake_reply(&server, &user, &post_id, Some(&a)).await;
    assert_eq!(get_post_view(&server, &post_id).await.replies_nr, 2);

    assert_eq!(delete_reply_count(&server, &user, &b).await, 1);
    assert_eq!(get_post_view(&server, &post_id).await.replies_nr, 1);

    let tree = get_reply_tree(&server, &post_id, None, None).await;
    assert_eq!(tree.total, 1);
    assert!(tree.replies[0].children.is_empty());
});

test_with_server!(delete_root_of_thread, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &user).await;
    let post_id = post.id.to_raw();

    let a = create_fake_reply(&server, &user, &post_id, None).await;
    let b = create_fake_reply(&server, &user, &post_id, Some(&a)).await;
    let _c = create_fake_reply(&server, &user, &post_id, Some(&a)).await;
    let _d = create_fake_reply(&server, &user, &post_id, Some(&b)).await;
    let _e = create_fake_reply(&server, &user, &post_id, None).await;

    assert_eq!(delete_reply_count(&server, &user, &a).await, 4);
    assert_eq!(get_post_view(&server, &post_id).await.replies_nr, 1);

    let tree = get_reply_tree(&server, &post_id, None, None).await;
    assert_eq!(tree.total, 1);
    assert_eq!(count_nodes(&tree.replies), 1);
});

test_with_server!(delete_chain_counts_every_level, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &user).await;
    let post_id = post.id.to_raw();

    let depth = 5;
    let root = create_fake_reply(&server, &user, &post_id, None).await;
    let mut parent = root.clone();
    for _ in 0..depth {
        parent = create_fake_reply(&server, &user, &post_id, Some(&parent)).await;
    }
    assert_eq!(get_post_view(&server, &post_id).await.replies_nr, depth + 1);

    assert_eq!(delete_reply_count(&server, &user, &root).await as i64, depth + 1);
    assert_eq!(get_post_view(&server, &post_id).await.replies_nr, 0);
});

test_with_server!(delete_twice_is_not_found, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &user).await;
    let post_id = post.id.to_raw();

    let a = create_fake_reply(&server, &user, &post_id, None).await;
    let _b = create_fake_reply(&server, &user, &post_id, None).await;

    assert_eq!(delete_reply_count(&server, &user, &a).await, 1);
    delete_reply(&server, &user, &a).await.assert_status_not_found();
    assert_eq!(get_post_view(&server, &post_id).await.replies_nr, 1);
});

test_with_server!(delete_of_other_users_reply_is_forbidden, |server, ctx_state, config| {
    let author = create_fake_login_test_user(&ctx_state);
    let other = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &author).await;
    let post_id = post.id.to_raw();

    let a = create_fake_reply(&server, &author, &post_id, None).await;
    let _b = create_fake_reply(&server, &other, &post_id, Some(&a)).await;

    delete_reply(&server, &other, &a).await.assert_status_forbidden();
    assert_eq!(get_post_view(&server, &post_id).await.replies_nr, 2);
    assert_eq!(get_reply_tree(&server, &post_id, None, None).await.total, 2);
});

test_with_server!(delete_requires_token, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &user).await;
    let a = create_fake_reply(&server, &user, &post.id.to_raw(), None).await;

    server
        .delete(&format!("/api/replies/{a}"))
        .await
        .assert_status_unauthorized();
    server
        .delete(&format!("/api/replies/{a}"))
        .add_header("Authorization", "Bearer not-a-token")
        .await
        .assert_status_unauthorized();
});

test_with_server!(delete_unknown_reply_is_not_found, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    delete_reply(&server, &user, "reply:not_a_real_id")
        .await
        .assert_status_not_found();
});

test_with_server!(deleted_reply_likes_are_removed, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &user).await;
    let post_id = post.id.to_raw();
    let a = create_fake_reply(&server, &user, &post_id, None).await;

    server
        .post(&format!("/api/replies/{a}/like"))
        .add_header("Authorization", user.bearer())
        .await
        .assert_status_ok();

    assert_eq!(delete_reply_count(&server, &user, &a).await, 1);

    let likes: Vec<serde_json::Value> = ctx_state
        .db
        .client
        .query(format!("SELECT * FROM like WHERE out={a};"))
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert!(likes.is_empty());
});

test_with_server!(delete_reply_of_missing_post, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&ctx_state);
    let post = create_fake_post(&server, &user).await;
    let post_id = post.id.to_raw();

    let a = create_fake_reply(&server, &user, &post_id, None).await;

    // the post vanishes while its reply is still stored
    ctx_state
        .db
        .client
        .query(format!("DELETE {post_id};"))
        .await
        .unwrap()
        .check()
        .unwrap();

    assert_eq!(delete_reply_count(&server, &user, &a).await, 1);

    let posts: Vec<serde_json::Value> = ctx_state
        .db
        .client
        .query(format!("SELECT * FROM {post_id};"))
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert!(posts.is_empty());

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
