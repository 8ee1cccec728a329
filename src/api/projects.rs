/// Project REST API endpoints
///
/// Creation, listing, per-owner listing, partial update, and deletion
/// under /api/projects.

use crate::api::{error::ApiError, AppState};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

/// Create project management routes
pub fn create_project_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects/add", post(add_project))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{id}", get(get_project))
        .route("/api/projects/{id}", put(update_project))
        .route("/api/projects/{id}", delete(delete_project))
        .route("/api/projects/user/{user_id}", get(list_projects_by_user))
}

/// Create a new project
///
/// POST /api/projects/add
/// Body: { "title": "...", ..., "user": { "id": N } }
/// The owner is resolved server-side; an unknown id is a 404 and nothing
/// is persisted.
async fn add_project(
    State(state): State<AppState>,
    Json(payload): Json<crate::project::NewProject>,
) -> Result<Json<crate::project::Project>, ApiError> {
    validate_new_project(&payload)?;

    let project = state.projects.create(payload).await?;
    Ok(Json(project))
}

/// Validate a project creation payload before it reaches the store layer
fn validate_new_project(payload: &crate::project::NewProject) -> Result<(), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title must not be empty"));
    }
    Ok(())
}

/// Validate a project patch before it reaches the store layer
fn validate_project_patch(patch: &crate::project::ProjectPatch) -> Result<(), ApiError> {
    if let Some(title) = &patch.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation("Title must not be empty"));
        }
    }
    Ok(())
}

/// List all projects (explorer page)
///
/// GET /api/projects
async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::project::Project>>, ApiError> {
    let projects = state.projects.list_all().await?;
    Ok(Json(projects))
}

/// Get a project by id
///
/// GET /api/projects/:id
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<crate::project::Project>, ApiError> {
    let project = state.projects.get(id).await?;
    Ok(Json(project))
}

/// List a user's projects (their public portfolio)
///
/// GET /api/projects/user/:user_id
async fn list_projects_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<crate::project::Project>>, ApiError> {
    let projects = state.projects.list_by_owner(user_id).await?;
    Ok(Json(projects))
}

/// Partially update a project
///
/// PUT /api/projects/:id
/// Body: any subset of title/description/github_url/demo_url/readme_content.
/// The owner cannot be changed here.
async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<crate::project::ProjectPatch>,
) -> Result<Json<crate::project::Project>, ApiError> {
    validate_project_patch(&patch)?;

    let project = state.projects.update(id, patch).await?;
    Ok(Json(project))
}

/// Delete a project
///
/// DELETE /api/projects/:id
/// Returns an empty 200 response. Ownership is not checked at this layer.
async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    state.projects.delete(id).await?;
    Ok(())
}
