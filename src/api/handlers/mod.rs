use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Redirect},
    Json,
};

use super::error::ApiError;
use crate::models::*;
use crate::store::RosterStore;

/// Landing page of the browser front-end.
pub const INDEX_PATH: &str = "/static/index.html";

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Root
// ============================================================

pub async fn root() -> Redirect {
    Redirect::temporary(INDEX_PATH)
}

// ============================================================
// Fallbacks
// ============================================================

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

// ============================================================
// Activities
// ============================================================

pub async fn list_activities(State(store): State<RosterStore>) -> Json<Catalog> {
    Json(store.list_activities())
}

/// Register a student. The activity name arrives percent-decoded, so
/// `Chess%20Club` and a literal space reach the store identically.
pub async fn signup(
    State(store): State<RosterStore>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ParticipantQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = path?;
    let Query(query) = query?;
    let confirmation = store.sign_up(&activity_name, &query.email)?;
    Ok(Json(confirmation.into()))
}

pub async fn unregister(
    State(store): State<RosterStore>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ParticipantQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = path?;
    let Query(query) = query?;
    let confirmation = store.unregister(&activity_name, &query.email)?;
    Ok(Json(confirmation.into()))
}
