//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::Json;
use tasktracker_core::error::CoreError;
use tasktracker_core::filter::ProjectQuery;
use tasktracker_core::models::{Project, ProjectInput};

use crate::error::AppResult;
use crate::extract::{Key, Params, Payload};
use crate::state::AppState;

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    Payload(input): Payload<ProjectInput>,
) -> AppResult<Json<Project>> {
    let project = state.projects.create(input).await?;
    Ok(Json(project))
}

/// GET /projects
pub async fn list(
    State(state): State<AppState>,
    Params(query): Params<ProjectQuery>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = state.projects.list(&query).await?;
    tracing::debug!(count = projects.len(), "Listed projects");
    Ok(Json(projects))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Key(id): Key,
) -> AppResult<Json<Project>> {
    let project = state
        .projects
        .get(id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id,
        })?;
    Ok(Json(project))
}

/// PUT /projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Key(id): Key,
    Payload(input): Payload<ProjectInput>,
) -> AppResult<Json<Project>> {
    let project = state.projects.update(id, input).await?;
    Ok(Json(project))
}

/// DELETE /projects/{id}
pub async fn delete(State(state): State<AppState>, Key(id): Key) -> AppResult<()> {
    state.projects.delete(id).await?;
    Ok(())
}
