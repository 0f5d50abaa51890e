pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::merge::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:sid",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:sid/template",
            put(handlers::handle_set_template),
        )
        // Registry mutation
        .route(
            "/api/v1/sessions/:sid/placeholders",
            post(handlers::handle_add_placeholder),
        )
        .route(
            "/api/v1/sessions/:sid/placeholders/:pid",
            patch(handlers::handle_rename_placeholder).delete(handlers::handle_remove_placeholder),
        )
        .route(
            "/api/v1/sessions/:sid/placeholders/:pid/values",
            post(handlers::handle_add_value),
        )
        .route(
            "/api/v1/sessions/:sid/placeholders/:pid/values/:vid",
            patch(handlers::handle_update_value).delete(handlers::handle_remove_value),
        )
        // Merge
        .route(
            "/api/v1/sessions/:sid/preview-count",
            get(handlers::handle_preview_count),
        )
        .route(
            "/api/v1/sessions/:sid/generate",
            post(handlers::handle_generate),
        )
        .route("/api/v1/sessions/:sid/export", get(handlers::handle_export))
        .with_state(state)
}
