//! Repository for the `tasks` table.

use sqlx::{PgExecutor, PgPool};
use tasktracker_core::filter::Filter;
use tasktracker_core::models::TaskInput;
use tasktracker_core::types::DbId;

use crate::filter::{bind_values, render};
use crate::models::TaskRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, priority, status_id, project_id";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// Accepts any executor so project creation can insert nested tasks
    /// inside its own transaction.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &TaskInput,
    ) -> Result<TaskRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (name, description, priority, status_id, project_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.status.id())
            .bind(input.project_id)
            .fetch_one(executor)
            .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks matching `filter`, in its sort order.
    pub async fn list(pool: &PgPool, filter: &Filter) -> Result<Vec<TaskRow>, sqlx::Error> {
        let sql = render(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM tasks {} {}",
            sql.where_clause, sql.order_clause
        );
        bind_values(sqlx::query_as::<_, TaskRow>(&query), &sql.bind_values)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column of a task, including its project.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TaskInput,
    ) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                name = $2,
                description = $3,
                priority = $4,
                status_id = $5,
                project_id = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.status.id())
            .bind(input.project_id)
            .fetch_optional(pool)
            .await
    }

    /// Move a task to another project. Returns `None` if no task has `id`.
    pub async fn set_project(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!("UPDATE tasks SET project_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
