//! Handlers for read-only catalog browsing.

use axum::extract::{Path, State};
use axum::Json;
use buildcheck_core::category::ComponentCategory;
use buildcheck_core::component::Component;
use buildcheck_core::error::CoreError;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One row of the category index.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub category: ComponentCategory,
    pub label: &'static str,
    pub component_count: usize,
}

/// GET /catalog
///
/// Categories in build order with how many parts each offers.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategorySummary>>>> {
    let summaries = ComponentCategory::ALL
        .into_iter()
        .map(|category| CategorySummary {
            category,
            label: category.label(),
            component_count: state.catalog.components(category).len(),
        })
        .collect();
    Ok(Json(DataResponse { data: summaries }))
}

/// GET /catalog/{category}
///
/// Raw catalog listing in declaration order, without compatibility tags.
pub async fn list_components(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Component>>>> {
    let category = ComponentCategory::from_str_value(&category).map_err(CoreError::Validation)?;
    Ok(Json(DataResponse {
        data: state.catalog.components(category).to_vec(),
    }))
}
