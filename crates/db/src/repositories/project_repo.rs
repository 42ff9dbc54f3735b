//! Repository for the `projects` table.

use sqlx::PgPool;
use tasktracker_core::filter::Filter;
use tasktracker_core::models::ProjectInput;
use tasktracker_core::types::DbId;

use crate::filter::{bind_values, render};
use crate::models::ProjectRow;
use crate::repositories::TaskRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, start_date, complete_date, priority, status_id";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project and its nested tasks in one transaction, returning the project row.
    pub async fn create(pool: &PgPool, input: &ProjectInput) -> Result<ProjectRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, start_date, complete_date, priority, status_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.complete_date)
            .bind(input.priority)
            .bind(input.status.id())
            .fetch_one(&mut *tx)
            .await?;

        for task in &input.tasks {
            TaskRepo::create(&mut *tx, &task.clone().into_task_input(project.id)).await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List projects matching `filter`, in its sort order.
    pub async fn list(pool: &PgPool, filter: &Filter) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let sql = render(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM projects {} {}",
            sql.where_clause, sql.order_clause
        );
        bind_values(sqlx::query_as::<_, ProjectRow>(&query), &sql.bind_values)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column of a project.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProjectInput,
    ) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                start_date = $3,
                complete_date = $4,
                priority = $5,
                status_id = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.complete_date)
            .bind(input.priority)
            .bind(input.status.id())
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID; its tasks go with it (`ON DELETE CASCADE`).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
