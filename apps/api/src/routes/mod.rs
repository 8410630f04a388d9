pub mod health;
pub mod i18n;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::wizard::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/i18n/:lang", get(i18n::handle_get_translations))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        // Navigation & preferences
        .route("/api/v1/sessions/:id/step", put(handlers::handle_go_to_step))
        .route(
            "/api/v1/sessions/:id/back-to-edit",
            post(handlers::handle_back_to_edit),
        )
        .route(
            "/api/v1/sessions/:id/preferences",
            put(handlers::handle_set_preferences),
        )
        // Form fields
        .route(
            "/api/v1/sessions/:id/personal",
            patch(handlers::handle_update_personal),
        )
        .route("/api/v1/sessions/:id/about", put(handlers::handle_set_about))
        .route(
            "/api/v1/sessions/:id/references",
            put(handlers::handle_set_references),
        )
        .route(
            "/api/v1/sessions/:id/experience",
            post(handlers::handle_add_experience),
        )
        .route(
            "/api/v1/sessions/:id/experience/:entry",
            patch(handlers::handle_update_experience).delete(handlers::handle_remove_experience),
        )
        .route(
            "/api/v1/sessions/:id/education",
            post(handlers::handle_add_education),
        )
        .route(
            "/api/v1/sessions/:id/education/:entry",
            patch(handlers::handle_update_education).delete(handlers::handle_remove_education),
        )
        .route(
            "/api/v1/sessions/:id/lists/:list",
            put(handlers::handle_set_list),
        )
        .route(
            "/api/v1/sessions/:id/warnings",
            get(handlers::handle_get_warnings),
        )
        // Generation & result
        .route("/api/v1/sessions/:id/submit", post(handlers::handle_submit))
        .route(
            "/api/v1/sessions/:id/selection",
            put(handlers::handle_select_version),
        )
        .route("/api/v1/sessions/:id/result", get(handlers::handle_get_result))
        .route(
            "/api/v1/sessions/:id/result/text",
            get(handlers::handle_copy_text),
        )
        .route(
            "/api/v1/sessions/:id/result/document",
            get(handlers::handle_printable_document),
        )
        .with_state(state)
}
