//! API Integration Tests
//!
//! These tests need either a running server (`TEST_SERVER_URL`) or a
//! PostgreSQL instance plus `DATABASE_URL` and `JWT_SECRET` for an
//! in-process one. Without either they return early.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, server_or_skip, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

/// Notifications are written after the response; poll briefly for them
async fn unread_count_eventually(server: &TestServer, user: &TestUser, expected: i64) -> i64 {
    let mut count = -1;
    for _ in 0..20 {
        let response = server
            .get("/notifications/unread-count", Some(user.token()))
            .await
            .unwrap();
        let body: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
        count = body.count;
        if count == expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    count
}

async fn create_post(server: &TestServer, user: &TestUser, description: &str) -> PostResponse {
    let response = server
        .post("/posts", Some(user.token()), &CreatePostRequest::new(description))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = server_or_skip!();
    let response = server.get_root("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = server_or_skip!();
    let response = server.get_root("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let server = server_or_skip!();
    let user = TestUser::register(&server, "reg").await.unwrap();
    assert!(!user.access_token.is_empty());

    let login = LoginRequest::from_register(&user.registration);
    let response = server.post("/auth/login", None, &login).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.id, user.id);
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.user.email.as_deref(), Some(user.registration.email.as_str()));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = server_or_skip!();
    let user = TestUser::register(&server, "dup").await.unwrap();

    let mut again = RegisterRequest::unique("dup");
    again.email = user.registration.email.clone();
    let response = server.post("/auth/register", None, &again).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_validation() {
    let server = server_or_skip!();
    let mut request = RegisterRequest::unique("val");
    request.username = "no spaces allowed".to_string();

    let response = server.post("/auth/register", None, &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = server_or_skip!();
    let login = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/auth/login", None, &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    let server = server_or_skip!();
    let user = TestUser::register(&server, "refresh").await.unwrap();

    let body = json!({ "refreshToken": user.refresh_token });
    let response = server.post("/auth/refresh", None, &body).await.unwrap();
    let tokens: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());

    // An access token cannot be used to refresh
    let body = json!({ "refreshToken": user.access_token });
    let response = server.post("/auth/refresh", None, &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_me_requires_auth() {
    let server = server_or_skip!();
    let response = server.get("/users/@me", None).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "UNAUTHORIZED");

    let response = server.get("/users/@me", Some("garbage")).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_update_me() {
    let server = server_or_skip!();
    let user = TestUser::register(&server, "upd").await.unwrap();

    let body = json!({ "bio": "hello there", "fullName": "Updated Name" });
    let response = server.patch("/users/@me", user.token(), &body).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.bio.as_deref(), Some("hello there"));
    assert_eq!(me.full_name, "Updated Name");

    let response = server.get(&format!("/users/{}", user.id), None).await.unwrap();
    let public: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public.full_name, "Updated Name");
    assert!(public.email.is_none());
}

#[tokio::test]
async fn test_search_users() {
    let server = server_or_skip!();
    let user = TestUser::register(&server, "findme").await.unwrap();

    let response = server
        .get(&format!("/users/search?q={}", user.username), None)
        .await
        .unwrap();
    let found: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(found.iter().any(|u| u.id == user.id));

    let response = server.get("/users/search?q=x&limit=500", None).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_get_user_errors() {
    let server = server_or_skip!();

    let response = server.get("/users/not-a-number", None).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_ID");

    let response = server.get("/users/1", None).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_profile_summary() {
    let server = server_or_skip!();
    let alice = TestUser::register(&server, "prof").await.unwrap();
    let bob = TestUser::register(&server, "viewer").await.unwrap();
    create_post(&server, &alice, "first").await;

    let response = server
        .post("/follow", Some(bob.token()), &json!({ "userId": alice.id }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // By username
    let response = server
        .get(&format!("/profiles/{}", alice.username), Some(bob.token()))
        .await
        .unwrap();
    let summary: ProfileSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.user.id, alice.id);
    assert_eq!(summary.stats.posts, 1);
    assert_eq!(summary.stats.followers, 1);
    assert_eq!(summary.stats.following, 0);
    assert_eq!(summary.posts.len(), 1);
    assert_eq!(summary.is_following, Some(true));

    // `me` resolves to the caller and omits isFollowing
    let response = server.get("/profiles/me", Some(alice.token())).await.unwrap();
    let own: ProfileSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(own.user.id, alice.id);
    assert!(own.is_following.is_none());

    // Numeric id works too
    let response = server
        .get(&format!("/profiles/{}", alice.id), Some(bob.token()))
        .await
        .unwrap();
    let by_id: ProfileSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(by_id.user.id, alice.id);
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_post_lifecycle() {
    let server = server_or_skip!();
    let author = TestUser::register(&server, "author").await.unwrap();
    let other = TestUser::register(&server, "other").await.unwrap();

    let post = create_post(&server, &author, "sunset").await;
    assert_eq!(post.author.id, author.id);
    assert_eq!((post.likes_count, post.comments_count), (0, 0));

    // Anonymous readers get no `liked` flag
    let response = server.get(&format!("/posts/{}", post.id), None).await.unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(fetched.liked.is_none());

    let response = server
        .get(&format!("/posts/{}", post.id), Some(other.token()))
        .await
        .unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.liked, Some(false));

    // Only the author may edit or delete
    let edit = json!({ "description": "sunrise" });
    let response = server
        .patch(&format!("/posts/{}", post.id), other.token(), &edit)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch(&format!("/posts/{}", post.id), author.token(), &edit)
        .await
        .unwrap();
    let edited: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.description, "sunrise");

    let response = server
        .delete(&format!("/posts/{}", post.id), other.token())
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete(&format!("/posts/{}", post.id), author.token())
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/posts/{}", post.id), None).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_user_posts_newest_first() {
    let server = server_or_skip!();
    let author = TestUser::register(&server, "feed").await.unwrap();
    let first = create_post(&server, &author, "one").await;
    let second = create_post(&server, &author, "two").await;

    let response = server
        .get(&format!("/users/{}/posts", author.id), None)
        .await
        .unwrap();
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

    let response = server
        .get(&format!("/users/{}/posts?before={}", author.id, second.id), None)
        .await
        .unwrap();
    let older: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].id, first.id);
}

#[tokio::test]
async fn test_explore() {
    let server = server_or_skip!();
    let author = TestUser::register(&server, "explore").await.unwrap();
    create_post(&server, &author, "explore me").await;

    for sort in ["trending", "new", "random"] {
        let response = server
            .get(&format!("/explore?sort={sort}&limit=5"), None)
            .await
            .unwrap();
        let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(posts.len() <= 5);
    }

    let response = server.get("/explore?page=0", None).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Like and Comment Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_like() {
    let server = server_or_skip!();
    let author = TestUser::register(&server, "liked").await.unwrap();
    let fan = TestUser::register(&server, "fan").await.unwrap();
    let post = create_post(&server, &author, "like me").await;
    let path = format!("/posts/{}/like", post.id);

    let response = server.post_empty(&path, fan.token()).await.unwrap();
    let status: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status, LikeStatusResponse { liked: true, count: 1 });

    let response = server.get(&path, Some(fan.token())).await.unwrap();
    let info: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(info, LikeStatusResponse { liked: true, count: 1 });

    let response = server
        .get(&format!("/posts/{}/likes", post.id), None)
        .await
        .unwrap();
    let likers: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(likers.len(), 1);
    assert_eq!(likers[0].id, fan.id);

    assert_eq!(unread_count_eventually(&server, &author, 1).await, 1);

    let response = server.post_empty(&path, fan.token()).await.unwrap();
    let status: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status, LikeStatusResponse { liked: false, count: 0 });

    // Liking one's own post does not notify
    let response = server.post_empty(&path, author.token()).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(unread_count_eventually(&server, &author, 1).await, 1);
}

#[tokio::test]
async fn test_comments() {
    let server = server_or_skip!();
    let author = TestUser::register(&server, "poster").await.unwrap();
    let commenter = TestUser::register(&server, "commenter").await.unwrap();
    let post = create_post(&server, &author, "discuss").await;
    let path = format!("/posts/{}/comments", post.id);

    let response = server
        .post(&path, Some(commenter.token()), &json!({ "text": "nice" }))
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.post_id, post.id);

    let response = server
        .post(&path, Some(commenter.token()), &json!({ "text": "" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let like_path = format!("/comments/{}/like", comment.id);
    let response = server.put(&like_path, author.token()).await.unwrap();
    let status: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status, LikeStatusResponse { liked: true, count: 1 });

    // Liking twice is idempotent
    let response = server.put(&like_path, author.token()).await.unwrap();
    let status: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.count, 1);

    let response = server.get(&path, Some(author.token())).await.unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert!(comments[0].liked);
    assert_eq!(comments[0].likes_count, 1);

    let response = server.delete(&like_path, author.token()).await.unwrap();
    let status: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status, LikeStatusResponse { liked: false, count: 0 });

    let response = server.get(&format!("/posts/{}", post.id), None).await.unwrap();
    let post: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(post.comments_count, 1);
}

// ============================================================================
// Follow and Notification Tests
// ============================================================================

#[tokio::test]
async fn test_follow_flow() {
    let server = server_or_skip!();
    let alice = TestUser::register(&server, "alice").await.unwrap();
    let bob = TestUser::register(&server, "bob").await.unwrap();
    let follow = json!({ "userId": bob.id });

    let response = server.post("/follow", Some(alice.token()), &follow).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/follow", Some(alice.token()), &follow).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_FOLLOWING");

    let response = server
        .post("/follow", Some(alice.token()), &json!({ "userId": alice.id }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get(&format!("/follow/is-following/{}", bob.id), Some(alice.token()))
        .await
        .unwrap();
    let status: FollowStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.is_following);

    let response = server
        .get(&format!("/follow/followers/{}", bob.id), None)
        .await
        .unwrap();
    let followers: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, alice.id);

    let response = server
        .get(&format!("/follow/following/{}", alice.id), None)
        .await
        .unwrap();
    let following: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(following[0].id, bob.id);

    let response = server
        .delete(&format!("/follow/{}", bob.id), alice.token())
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Unfollowing again is not an error
    let response = server
        .delete(&format!("/follow/{}", bob.id), alice.token())
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_notifications() {
    let server = server_or_skip!();
    let alice = TestUser::register(&server, "notified").await.unwrap();
    let bob = TestUser::register(&server, "actor").await.unwrap();

    let response = server
        .post("/follow", Some(bob.token()), &json!({ "userId": alice.id }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(unread_count_eventually(&server, &alice, 1).await, 1);

    let response = server.get("/notifications", Some(alice.token())).await.unwrap();
    let items: Vec<NotificationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, "follow");
    assert!(!items[0].is_read);
    assert_eq!(items[0].from_user.as_ref().unwrap()["username"], bob.username.as_str());

    // Someone else's notification is invisible
    let response = server
        .patch_empty(&format!("/notifications/{}/read", items[0].id), bob.token())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .patch_empty(&format!("/notifications/{}/read", items[0].id), alice.token())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread_count_eventually(&server, &alice, 0).await, 0);

    let response = server
        .patch_empty("/notifications/read-all", alice.token())
        .await
        .unwrap();
    let result: MarkAllReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(result.ok);
    assert_eq!(result.modified, 0);
}

// ============================================================================
// Messaging Tests
// ============================================================================

#[tokio::test]
async fn test_messaging_threads() {
    let server = server_or_skip!();
    let alice = TestUser::register(&server, "dm_a").await.unwrap();
    let bob = TestUser::register(&server, "dm_b").await.unwrap();

    let response = server
        .post("/messages", Some(alice.token()), &SendMessageRequest::text(&bob.id, "hi"))
        .await
        .unwrap();
    let sent: SendMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(sent.message.sender.id, alice.id);
    assert_eq!(sent.message.peer.id, bob.id);
    assert_eq!(sent.message.read_by, vec![alice.id.clone()]);

    let response = server
        .post("/messages", Some(bob.token()), &SendMessageRequest::text(&alice.id, "hey"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/messages/threads", Some(alice.token())).await.unwrap();
    let threads: Vec<ThreadResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].peer.id, bob.id);
    assert_eq!(threads[0].last_message.text, "hey");
    assert_eq!(threads[0].last_message.sender_id, bob.id);
    assert_eq!(threads[0].unread_count, 1);

    let response = server
        .get(&format!("/messages/thread/{}", bob.id), Some(alice.token()))
        .await
        .unwrap();
    let conversation: ConversationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let texts: Vec<_> = conversation.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["hi", "hey"]);

    let read_path = format!("/messages/thread/{}/read", bob.id);
    let response = server.patch_empty(&read_path, alice.token()).await.unwrap();
    let receipt: ReadReceiptResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((receipt.matched, receipt.modified), (1, 1));

    let response = server.patch_empty(&read_path, alice.token()).await.unwrap();
    let receipt: ReadReceiptResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(receipt.ok);
    assert_eq!(receipt.modified, 0);

    let response = server.get("/messages/threads", Some(alice.token())).await.unwrap();
    let threads: Vec<ThreadResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(threads[0].unread_count, 0);
}

#[tokio::test]
async fn test_messaging_errors() {
    let server = server_or_skip!();
    let alice = TestUser::register(&server, "dm_err").await.unwrap();
    let eve = TestUser::register(&server, "dm_eve").await.unwrap();

    let response = server
        .post("/messages", Some(alice.token()), &SendMessageRequest::text(&alice.id, "me"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "SELF_MESSAGE");

    let response = server
        .post("/messages", Some(alice.token()), &SendMessageRequest::text("1", "hello"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let bob = TestUser::register(&server, "dm_bob").await.unwrap();
    let response = server
        .post("/messages", Some(alice.token()), &SendMessageRequest::text(&bob.id, "secret"))
        .await
        .unwrap();
    let sent: SendMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A third party cannot mark the message read
    let response = server
        .patch_empty(&format!("/messages/read/{}", sent.message.id), eve.token())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .patch_empty(&format!("/messages/read/{}", sent.message.id), bob.token())
        .await
        .unwrap();
    let receipt: ReadReceiptResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(receipt.modified, 1);
}
