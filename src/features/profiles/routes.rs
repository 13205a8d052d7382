use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::profiles::handlers;
use crate::features::profiles::services::ProfileService;

/// Create routes for the profiles feature (all require authentication)
pub fn routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route(
            "/api/profiles/me",
            get(handlers::get_me).put(handlers::update_me),
        )
        .route("/api/profiles/me/photo", post(handlers::upload_photo))
        .route(
            "/api/profiles",
            get(handlers::list_profiles),
        )
        .route(
            "/api/profiles/{id}",
            get(handlers::get_public_profile)
                .put(handlers::update_profile_admin)
                .delete(handlers::delete_profile),
        )
        .with_state(service)
}
