//! Route definitions
//!
//! All REST routes are mounted under /api/v1; health checks sit at the root.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    auth, comments, follows, health, likes, messages, notifications, posts, users,
};
use crate::state::AppState;

/// Prefix for every REST route
pub const API_PREFIX: &str = "/api/v1";

/// Create the API router (excluding health, which skips rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest(API_PREFIX, api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(follow_routes())
        .merge(notification_routes())
        .merge(message_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/search", get(users::search_users))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/posts", get(users::get_user_posts))
        .route("/profiles/:id_or_username", get(users::get_profile))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/explore", get(posts::explore))
        // Likes
        .route(
            "/posts/:post_id/like",
            post(likes::toggle_like).get(likes::get_like_info),
        )
        .route("/posts/:post_id/likes", get(likes::get_likers))
        // Comments
        .route(
            "/posts/:post_id/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/:comment_id/like",
        put(comments::like_comment).delete(comments::unlike_comment),
    )
}

fn follow_routes() -> Router<AppState> {
    Router::new()
        .route("/follow", post(follows::follow))
        .route("/follow/:user_id", delete(follows::unfollow))
        .route("/follow/is-following/:user_id", get(follows::is_following))
        .route("/follow/followers/:user_id", get(follows::followers))
        .route("/follow/following/:user_id", get(follows::following))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/read-all", patch(notifications::mark_all_read))
        .route(
            "/notifications/:notification_id/read",
            patch(notifications::mark_read),
        )
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(messages::send_message))
        .route("/messages/threads", get(messages::list_threads))
        .route("/messages/thread/:peer_id", get(messages::get_thread))
        .route(
            "/messages/thread/:peer_id/read",
            patch(messages::mark_thread_read),
        )
        .route("/messages/read/:message_id", patch(messages::mark_message_read))
}
