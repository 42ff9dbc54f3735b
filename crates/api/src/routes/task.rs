//! Route definitions for the `/tasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// PATCH  /{id}?project_key=       -> change_project
/// DELETE /{id}                    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id)
                .put(task::update)
                .patch(task::change_project)
                .delete(task::delete),
        )
}
