//! Handlers for the `/tasks` resource.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tasktracker_core::error::CoreError;
use tasktracker_core::filter::TaskQuery;
use tasktracker_core::models::{Task, TaskInput};
use tasktracker_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{Key, Params, Payload};
use crate::state::AppState;

/// Query parameters for `PATCH /tasks/{id}`.
#[derive(Debug, Deserialize)]
pub struct ChangeProjectParams {
    #[serde(alias = "projectKey")]
    pub project_key: DbId,
}

/// POST /tasks
pub async fn create(
    State(state): State<AppState>,
    Payload(input): Payload<TaskInput>,
) -> AppResult<Json<Task>> {
    let task = state.tasks.create(input).await?;
    Ok(Json(task))
}

/// GET /tasks
pub async fn list(
    State(state): State<AppState>,
    Params(query): Params<TaskQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list(&query).await?;
    tracing::debug!(count = tasks.len(), "Listed tasks");
    Ok(Json(tasks))
}

/// GET /tasks/{id}
pub async fn get_by_id(State(state): State<AppState>, Key(id): Key) -> AppResult<Json<Task>> {
    let task = state
        .tasks
        .get(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Task", id })?;
    Ok(Json(task))
}

/// PUT /tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Key(id): Key,
    Payload(input): Payload<TaskInput>,
) -> AppResult<Json<Task>> {
    let task = state.tasks.update(id, input).await?;
    Ok(Json(task))
}

/// PATCH /tasks/{id}?project_key={project_id}
pub async fn change_project(
    State(state): State<AppState>,
    Key(id): Key,
    Params(params): Params<ChangeProjectParams>,
) -> AppResult<Json<Task>> {
    let task = state.tasks.change_project(id, params.project_key).await?;
    Ok(Json(task))
}

/// DELETE /tasks/{id}
pub async fn delete(State(state): State<AppState>, Key(id): Key) -> AppResult<()> {
    state.tasks.delete(id).await?;
    Ok(())
}
