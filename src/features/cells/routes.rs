use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::cells::handlers;
use crate::features::cells::services::CellService;

/// Create routes for the cells feature (all require authentication)
pub fn routes(service: Arc<CellService>) -> Router {
    Router::new()
        .route(
            "/api/cells",
            get(handlers::list_cells).post(handlers::create_cell),
        )
        .route("/api/cells/resolve-address", get(handlers::resolve_address))
        .route(
            "/api/cells/meetings/{meeting_id}/attendance",
            put(handlers::record_attendance),
        )
        .route(
            "/api/cells/{id}",
            get(handlers::get_cell)
                .put(handlers::update_cell)
                .delete(handlers::delete_cell),
        )
        .route("/api/cells/{id}/location", put(handlers::save_location))
        .route(
            "/api/cells/{id}/members",
            get(handlers::list_members).post(handlers::add_member),
        )
        .route(
            "/api/cells/{id}/members/{member_id}",
            axum::routing::delete(handlers::remove_member),
        )
        .route(
            "/api/cells/{id}/meetings",
            get(handlers::list_meetings).post(handlers::create_meeting),
        )
        .with_state(service)
}
