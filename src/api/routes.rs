//! API route definitions

use super::handlers::{self, NotesApiState};
use super::{note_handlers, overview_handlers};
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: NotesApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Overview
        .route("/api/overview", get(overview_handlers::get_overview))
        // ====================================================================
        // Product notes
        // ====================================================================
        .route(
            "/api/products/{product_id}/notes",
            get(note_handlers::list_product_notes).post(note_handlers::create_note),
        )
        .route(
            "/api/products/{product_id}/notes/{note_id}",
            put(note_handlers::update_note).delete(note_handlers::delete_note),
        )
        .route("/api/notes/batch", post(note_handlers::create_batch))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
