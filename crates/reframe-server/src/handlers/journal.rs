//! Journal endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use reframe_core::{Entry, Insights};

/// Request body for analyzing a new entry
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Raw journal text
    pub entry: String,
}

/// Response for a newly analyzed entry
///
/// Insights are recomputed over the full history including the entry that
/// was just written, so the client never sees a stale rollup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub entry: Entry,
    pub insights: Insights,
}

/// Query parameters for listing entries
#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    /// Maximum entries to return (default 50)
    pub limit: Option<i64>,
}

/// Request body for completing an action step
#[derive(Debug, Deserialize)]
pub struct CompleteActionRequest {
    /// The action text exactly as it appears on the entry's plan
    pub action: String,
}

/// GET /api/health - liveness check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /api/journal/analyze - analyze and persist a new entry
pub async fn analyze_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analyzed = state.analyzer.analyze(&req.entry)?;
    let entry = state.db.insert_entry(req.entry.trim(), &analyzed)?;

    let history = state.db.list_entries(None)?;
    let insights = state.analyzer.build_insights(&history);

    Ok(Json(AnalyzeResponse { entry, insights }))
}

/// GET /api/journal/entries - list entries, newest first
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EntriesQuery>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, MAX_PAGE_LIMIT);
    let entries = state.db.list_entries(Some(limit))?;
    Ok(Json(entries))
}

/// GET /api/journal/insights - aggregate insights over the full history
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Insights>, AppError> {
    let history = state.db.list_entries(None)?;
    Ok(Json(state.analyzer.build_insights(&history)))
}

/// POST /api/journal/entries/:id/actions/complete - mark an action step done
pub async fn complete_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<CompleteActionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.complete_action(id, &req.action)?;
    Ok(Json(SuccessResponse { success: true }))
}
