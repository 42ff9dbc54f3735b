pub mod health;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                       list, create
/// /projects/{id}                  get, update, delete
///
/// /tasks                          list, create
/// /tasks/{id}                     get, update, delete
/// /tasks/{id}?project_key=        reassign to another project (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
}
