use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
///
/// ```text
/// GET /              -> list_categories
/// GET /{category}    -> list_components
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_categories))
        .route("/{category}", get(catalog::list_components))
}
