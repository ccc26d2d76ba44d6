//! Handlers for the project JSON API.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use portfolio_core::project::{Project, ProjectDraft};
use portfolio_core::types::ProjectId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::StatusResponse;
use crate::state::AppState;

/// Filename offered by the export download.
pub const EXPORT_FILENAME: &str = "portfolio-projects-backup.json";

/// Body for `POST /admin/api/projects`. With `id` it updates, without it creates.
#[derive(Debug, Deserialize)]
pub struct SaveProjectRequest {
    #[serde(default)]
    pub id: Option<ProjectId>,
    #[serde(flatten)]
    pub draft: ProjectDraft,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// GET /api/projects
///
/// Public listing. Falls back to the default project when nothing can be read.
pub async fn list_public(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.store.load().await)
}

/// GET /admin/api/projects
pub async fn list(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.store.reload().await?))
}

/// POST /admin/api/projects
pub async fn save(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<SaveProjectRequest>,
) -> AppResult<Json<StatusResponse>> {
    let id = match input.id {
        Some(id) => {
            state.store.update(&id, input.draft).await?;
            id
        }
        None => state.store.create(input.draft).await?,
    };
    Ok(Json(StatusResponse::saved(id)))
}

/// DELETE /admin/api/projects?id=<id>
pub async fn delete(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<StatusResponse>> {
    let id = params
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Project id is required".into()))?;
    state.store.delete(&ProjectId::new(id)).await?;
    Ok(Json(StatusResponse::deleted()))
}

/// GET /admin/api/projects/export
///
/// Pretty-printed JSON of the authoritative list as a file download.
pub async fn export(_admin: AdminSession, State(state): State<AppState>) -> AppResult<Response> {
    let projects = state.store.reload().await?;
    let body = serde_json::to_string_pretty(&projects)
        .map_err(|e| AppError::InternalError(format!("Failed to encode export: {e}")))?;
    tracing::info!(count = projects.len(), "Projects exported");

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}
