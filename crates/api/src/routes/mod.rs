pub mod build;
pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog                                    category index
/// /catalog/{category}                         raw listing
///
/// /build                                      start session (POST)
/// /build/evaluate                             stateless evaluation (POST)
/// /build/{session_id}                         discard session (DELETE)
/// /build/{session_id}/state                   selection + report
/// /build/{session_id}/select                  select / clear a category (POST)
/// /build/{session_id}/clear                   clear every category (POST)
/// /build/{session_id}/catalog/{category}      compatibility-tagged listing
/// /build/{session_id}/matrix                  compatibility matrix
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/build", build::router())
}
