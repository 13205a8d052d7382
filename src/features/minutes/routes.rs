use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::minutes::handlers;
use crate::features::minutes::services::MinuteService;

/// Create routes for the minutes feature (all require authentication)
pub fn routes(service: Arc<MinuteService>) -> Router {
    Router::new()
        .route(
            "/api/minutes",
            get(handlers::list_minutes).post(handlers::create_minute),
        )
        .route(
            "/api/minutes/generate-number",
            get(handlers::generate_number),
        )
        .route(
            "/api/minutes/{id}",
            get(handlers::get_minute)
                .put(handlers::update_minute)
                .delete(handlers::delete_minute),
        )
        .route(
            "/api/minutes/{id}/pdf",
            get(handlers::get_pdf_url).post(handlers::upload_pdf),
        )
        .route("/api/minutes/{id}/archive", post(handlers::archive_minute))
        .route("/api/minutes/{id}/summary", post(handlers::request_summary))
        .route("/api/minutes/{id}/logs", get(handlers::get_logs))
        .with_state(service)
}
