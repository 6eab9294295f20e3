extern crate resep;

mod common;

use crate::common::{comment, outline, test_user, MockGateway};
use anyhow::Result;
use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use resep::{
    common::{
        comment::build_comment_tree,
        newtypes::{CommentId, PostId},
        post::ImageUpload,
        vote::VoteValue,
    },
    frontend::{
        thread::{find_node, render_thread, ReplyGate, ThreadState},
        utils::errors::FrontendError,
    },
};
use serde_json::json;

#[tokio::test]
async fn test_list_comments_into_thread() -> Result<()> {
    let gateway = MockGateway::start().await;
    let rows = vec![
        comment(10, None, 1),
        comment(20, None, 2),
        comment(11, Some(10), 3),
        comment(21, Some(20), 4),
    ];
    gateway.respond(
        Method::GET,
        "/rest/v1/comments",
        StatusCode::OK,
        serde_json::to_string(&rows)?,
    );

    let comments = gateway.client.list_comments(PostId(7)).await?;
    assert_eq!(rows, comments);

    let requests = gateway.requests();
    assert_eq!(1, requests.len());
    assert_eq!("select=*&post_id=eq.7&order=created_at.asc", requests[0].query);
    assert_eq!(Some("anon"), requests[0].apikey.as_deref());
    assert_eq!(Some("Bearer anon"), requests[0].authorization.as_deref());

    let tree = build_comment_tree(&comments);
    assert_eq!(vec![(10, 0), (11, 1), (20, 0), (21, 1)], outline(&tree));
    assert_eq!(tree, build_comment_tree(&comments));
    let lines = render_thread(&tree, &ThreadState::default());
    let rendered: Vec<_> = lines.iter().map(|l| (l.id.0, l.depth)).collect();
    assert_eq!(outline(&tree), rendered);
    Ok(())
}

#[tokio::test]
async fn test_reply_is_sent_with_parent_and_author() -> Result<()> {
    let gateway = MockGateway::start().await;
    let user = test_user();

    gateway
        .client
        .create_comment(PostId(7), "Enak sekali!".to_string(), Some(CommentId(10)), Some(&user))
        .await?;

    let requests = gateway.requests();
    assert_eq!(1, requests.len());
    let req = &requests[0];
    assert_eq!(Method::POST, req.method);
    assert_eq!("/rest/v1/comments", req.path);
    assert_eq!(Some("return=minimal"), req.prefer.as_deref());
    assert_eq!(Some("Bearer sari-token"), req.authorization.as_deref());
    assert_eq!(
        json!({
            "post_id": 7,
            "content": "Enak sekali!",
            "parent_comment_id": 10,
            "user_id": user.id,
            "author": "sari@example.com",
        }),
        req.json()
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_comment_sends_nothing() -> Result<()> {
    let gateway = MockGateway::start().await;

    let res = gateway
        .client
        .create_comment(PostId(7), "hi".to_string(), None, None)
        .await;
    assert_eq!(Err(FrontendError::NotAuthenticated), res);

    let res = gateway
        .client
        .create_comment(PostId(7), "  \n ".to_string(), None, Some(&test_user()))
        .await;
    assert!(matches!(res, Err(FrontendError::Invalid(_))));

    assert!(gateway.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_gateway_error_message() -> Result<()> {
    let gateway = MockGateway::start().await;
    gateway.respond(
        Method::POST,
        "/rest/v1/comments",
        StatusCode::FORBIDDEN,
        r#"{"code":"42501","message":"new row violates row-level security policy"}"#,
    );

    let res = gateway
        .client
        .create_comment(PostId(7), "Enak".to_string(), None, Some(&test_user()))
        .await;
    assert_eq!(
        Err(FrontendError::Remote(
            "new row violates row-level security policy".to_string()
        )),
        res
    );
    Ok(())
}

#[tokio::test]
async fn test_edit_and_delete_are_scoped_to_author() -> Result<()> {
    let gateway = MockGateway::start().await;
    let user = test_user();

    gateway
        .client
        .update_comment(CommentId(11), "Lebih enak".to_string(), Some(&user))
        .await?;
    gateway.client.delete_comment(CommentId(11), Some(&user)).await?;

    let requests = gateway.requests();
    assert_eq!(2, requests.len());
    let scope = format!("id=eq.11&user_id=eq.{}", user.id);
    assert_eq!(Method::PATCH, requests[0].method);
    assert_eq!(scope, requests[0].query);
    assert_eq!(json!({ "content": "Lebih enak" }), requests[0].json());
    assert_eq!(Method::DELETE, requests[1].method);
    assert_eq!(scope, requests[1].query);
    Ok(())
}

#[tokio::test]
async fn test_repeating_vote_withdraws_it() -> Result<()> {
    let gateway = MockGateway::start().await;
    let user = test_user();
    gateway.respond(
        Method::GET,
        "/rest/v1/votes",
        StatusCode::OK,
        json!([{ "id": 3, "post_id": 7, "user_id": user.id, "vote": 1 }]).to_string(),
    );

    gateway.client.vote(PostId(7), VoteValue::Like, Some(&user)).await?;

    let requests = gateway.requests();
    assert_eq!(2, requests.len());
    assert_eq!(Method::GET, requests[0].method);
    assert_eq!(
        format!("select=*&post_id=eq.7&user_id=eq.{}", user.id),
        requests[0].query
    );
    assert_eq!(Method::DELETE, requests[1].method);
    assert_eq!("/rest/v1/votes", requests[1].path);
    assert_eq!("id=eq.3", requests[1].query);
    Ok(())
}

#[tokio::test]
async fn test_first_vote_is_inserted() -> Result<()> {
    let gateway = MockGateway::start().await;
    let user = test_user();
    gateway.respond(Method::GET, "/rest/v1/votes", StatusCode::OK, "[]");

    gateway.client.vote(PostId(7), VoteValue::Dislike, Some(&user)).await?;

    let requests = gateway.requests();
    assert_eq!(2, requests.len());
    assert_eq!(Method::POST, requests[1].method);
    assert_eq!(
        json!({ "post_id": 7, "user_id": user.id, "vote": -1 }),
        requests[1].json()
    );
    Ok(())
}

#[tokio::test]
async fn test_create_post_uploads_image_first() -> Result<()> {
    let gateway = MockGateway::start().await;
    let user = test_user();
    let image = ImageUpload {
        file_name: "soto.jpg".to_string(),
        bytes: vec![0xff, 0xd8, 0xff],
    };

    gateway
        .client
        .create_post(
            "Soto".to_string(),
            "Rebus ayam".to_string(),
            None,
            Some(image),
            Some(&user),
        )
        .await?;

    let requests = gateway.requests();
    assert_eq!(2, requests.len());
    assert_eq!(Method::POST, requests[0].method);
    assert!(requests[0].path.starts_with("/storage/v1/object/post-images/Soto-"));
    assert!(requests[0].path.ends_with("-soto.jpg"));
    assert_eq!(vec![0xff, 0xd8, 0xff], requests[0].body);
    assert_eq!(Some("Bearer sari-token"), requests[0].authorization.as_deref());

    assert_eq!("/rest/v1/posts", requests[1].path);
    let post = requests[1].json();
    assert_eq!(json!("Soto"), post["title"]);
    let object = requests[0].path.trim_start_matches("/storage/v1/object/post-images/");
    assert_eq!(
        json!(format!(
            "{}/storage/v1/object/public/post-images/{object}",
            gateway.base_url()
        )),
        post["image_url"]
    );
    assert_eq!(json!("https://example.com/sari.png"), post["avatar_url"]);
    Ok(())
}

#[tokio::test]
async fn test_failed_upload_stores_no_post() -> Result<()> {
    let gateway = MockGateway::start().await;
    gateway.respond(
        Method::POST,
        "/storage/v1/object/post-images/",
        StatusCode::NOT_FOUND,
        r#"{"error":"Bucket not found"}"#,
    );
    let image = ImageUpload {
        file_name: "soto.jpg".to_string(),
        bytes: vec![1],
    };

    let res = gateway
        .client
        .create_post(
            "Soto".to_string(),
            "Rebus ayam".to_string(),
            None,
            Some(image),
            Some(&test_user()),
        )
        .await;
    assert_eq!(Err(FrontendError::Remote("Bucket not found".to_string())), res);
    assert_eq!(1, gateway.requests().len());
    Ok(())
}

#[test]
fn test_thread_collapse_and_reply_gate() {
    let comments = vec![
        comment(10, None, 1),
        comment(20, None, 2),
        comment(11, Some(10), 3),
        comment(21, Some(20), 4),
        comment(12, Some(11), 5),
    ];
    let tree = build_comment_tree(&comments);
    let mut state = ThreadState::default();

    let node = find_node(&tree, CommentId(10)).expect("comment 10 is in the tree");
    assert!(state.toggle_collapsed(node));
    let visible: Vec<_> = render_thread(&tree, &state).iter().map(|l| l.id.0).collect();
    assert_eq!(vec![10, 20, 21], visible);

    // signed out, the reply is remembered and opens after sign in
    assert_eq!(ReplyGate::AuthRequired, state.request_reply(CommentId(21), None));
    assert!(!state.is_reply_open(CommentId(21), None));
    let user = test_user();
    assert_eq!(Some(CommentId(21)), state.resume_pending_reply(Some(&user)));
    assert!(state.is_reply_open(CommentId(21), Some(&user)));

    // refetch with a new reply keeps the view state
    let mut comments = comments;
    comments.push(comment(13, Some(10), 6));
    let tree = build_comment_tree(&comments);
    let lines = render_thread(&tree, &state);
    let collapsed = lines.iter().find(|l| l.id == CommentId(10)).map(|l| (l.collapsed, l.reply_count));
    assert_eq!(Some((true, 2)), collapsed);
    assert!(state.is_reply_open(CommentId(21), Some(&user)));
}
