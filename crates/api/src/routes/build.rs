use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::build;
use crate::state::AppState;

/// Routes mounted at `/build`.
///
/// ```text
/// POST   /                                  -> create_session
/// POST   /evaluate                          -> evaluate
/// DELETE /{session_id}                      -> delete_session
/// GET    /{session_id}/state                -> get_state
/// POST   /{session_id}/select               -> select_component
/// POST   /{session_id}/clear                -> clear_build
/// GET    /{session_id}/catalog/{category}   -> get_filtered_catalog
/// GET    /{session_id}/matrix               -> get_matrix
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(build::create_session))
        .route("/evaluate", post(build::evaluate))
        .route("/{session_id}", delete(build::delete_session))
        .route("/{session_id}/state", get(build::get_state))
        .route("/{session_id}/select", post(build::select_component))
        .route("/{session_id}/clear", post(build::clear_build))
        .route(
            "/{session_id}/catalog/{category}",
            get(build::get_filtered_catalog),
        )
        .route("/{session_id}/matrix", get(build::get_matrix))
}
