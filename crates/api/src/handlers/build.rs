//! Handlers for build sessions and stateless build evaluation.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use buildcheck_core::category::ComponentCategory;
use buildcheck_core::engine::{BuildReport, BuildState, CompatibilityEngine};
use buildcheck_core::error::CoreError;
use buildcheck_core::filter::CatalogEntry;
use buildcheck_core::matrix::CompatibilityMatrix;
use buildcheck_core::types::ComponentId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::sessions::SessionId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for selecting (or clearing) one category.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub category: String,
    /// `null` or absent clears the category.
    #[serde(default)]
    pub component_id: Option<ComponentId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionItem {
    pub category: String,
    pub component_id: ComponentId,
}

/// Request body for the stateless evaluation endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct EvaluateRequest {
    #[validate(length(max = 7, message = "a build has at most one component per category"))]
    pub selections: Vec<SelectionItem>,
}

#[derive(Debug, Serialize)]
pub struct CreatedSession {
    pub session_id: SessionId,
    pub state: BuildState,
}

fn parse_category(token: &str) -> Result<ComponentCategory, CoreError> {
    ComponentCategory::from_str_value(token).map_err(CoreError::Validation)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /build
///
/// Start a new, empty build session.
pub async fn create_session(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedSession>>)> {
    let (session_id, session) = state.sessions.create().await?;
    let build_state = session.lock().await.engine.state();

    tracing::info!(%session_id, "Build session started");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedSession {
                session_id,
                state: build_state,
            },
        }),
    ))
}

/// GET /build/{session_id}/state
pub async fn get_state(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<Json<DataResponse<BuildState>>> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.touch();
    Ok(Json(DataResponse {
        data: session.engine.state(),
    }))
}

/// POST /build/{session_id}/select
///
/// Select a component for a category, or clear it with `component_id: null`.
/// An unknown component id is rejected and the build is left as it was.
pub async fn select_component(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    payload: Result<Json<SelectRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<BuildReport>>> {
    let Json(input) = payload?;
    let category = parse_category(&input.category)?;

    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.touch();

    let report = match session.engine.select_component(category, input.component_id) {
        Ok(report) => report.clone(),
        Err(err) => {
            tracing::warn!(
                %session_id,
                %category,
                component_id = ?input.component_id,
                error = %err,
                "Selection rejected"
            );
            return Err(err.into());
        }
    };

    tracing::info!(
        %session_id,
        %category,
        component_id = ?input.component_id,
        issues = report.issues.len(),
        blocking = report.has_blocking_errors,
        estimated_wattage = report.metrics.estimated_wattage,
        "Build selection updated"
    );

    Ok(Json(DataResponse { data: report }))
}

/// GET /build/{session_id}/catalog/{category}
///
/// Every component of the category, tagged with compatibility against the
/// rest of the build.
pub async fn get_filtered_catalog(
    State(state): State<AppState>,
    Path((session_id, category)): Path<(SessionId, String)>,
) -> AppResult<Json<DataResponse<Vec<CatalogEntry>>>> {
    let category = parse_category(&category)?;
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.touch();
    Ok(Json(DataResponse {
        data: session.engine.filtered_catalog(category),
    }))
}

/// GET /build/{session_id}/matrix
pub async fn get_matrix(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<Json<DataResponse<CompatibilityMatrix>>> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.touch();
    Ok(Json(DataResponse {
        data: session.engine.matrix(),
    }))
}

/// POST /build/{session_id}/clear
pub async fn clear_build(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<Json<DataResponse<BuildReport>>> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.touch();
    let report = session.engine.clear().clone();
    tracing::info!(%session_id, "Build cleared");
    Ok(Json(DataResponse { data: report }))
}

/// DELETE /build/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<StatusCode> {
    state.sessions.remove(session_id).await?;
    tracing::info!(%session_id, "Build session discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /build/evaluate
///
/// Evaluate a full selection snapshot without creating a session.
pub async fn evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<BuildState>>> {
    let Json(input) = payload?;
    input.validate()?;
    let picks = input
        .selections
        .iter()
        .map(|item| Ok((parse_category(&item.category)?, item.component_id)))
        .collect::<Result<Vec<_>, CoreError>>()?;

    let engine = CompatibilityEngine::with_selection(state.catalog.clone(), picks)?;
    tracing::debug!(
        selected = engine.metrics().selected_count,
        issues = engine.issues().len(),
        "Evaluated build snapshot"
    );
    Ok(Json(DataResponse {
        data: engine.state(),
    }))
}
