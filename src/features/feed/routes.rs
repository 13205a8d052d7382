use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::feed::handlers;
use crate::features::feed::services::FeedService;

/// Create routes for the feed feature (all require authentication)
pub fn routes(service: Arc<FeedService>) -> Router {
    Router::new()
        .route("/api/feed", get(handlers::load_feed))
        .route("/api/feed/posts", post(handlers::create_post))
        .route("/api/feed/images", post(handlers::upload_image))
        .route(
            "/api/feed/posts/{id}",
            put(handlers::update_post).delete(handlers::delete_post),
        )
        .route("/api/feed/posts/{id}/like", post(handlers::toggle_like))
        .route("/api/feed/posts/{id}/pin", post(handlers::toggle_pin))
        .route(
            "/api/feed/posts/{id}/comments",
            post(handlers::add_comment),
        )
        .route(
            "/api/feed/posts/{id}/comments/{comment_id}",
            delete(handlers::delete_comment),
        )
        .with_state(service)
}
