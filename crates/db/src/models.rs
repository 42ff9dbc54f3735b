//! Row structs for the `projects` and `tasks` tables.
//!
//! Statuses are stored as SMALLINT ids; converting a row into its domain
//! entity resolves the id against the status enum.

use sqlx::FromRow;
use tasktracker_core::error::CoreError;
use tasktracker_core::models::{Project, Task};
use tasktracker_core::status::{ProjectStatus, StatusId, TaskStatus};
use tasktracker_core::types::{DbId, Priority, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub start_date: Timestamp,
    pub complete_date: Timestamp,
    pub priority: Priority,
    pub status_id: StatusId,
}

impl TryFrom<ProjectRow> for Project {
    type Error = CoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = ProjectStatus::from_id(row.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "project {} has unknown status id {}",
                row.id, row.status_id
            ))
        })?;
        Ok(Project {
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            complete_date: row.complete_date,
            priority: row.priority,
            status,
        })
    }
}

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status_id: StatusId,
    pub project_id: DbId,
}

impl TryFrom<TaskRow> for Task {
    type Error = CoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_id(row.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "task {} has unknown status id {}",
                row.id, row.status_id
            ))
        })?;
        Ok(Task {
            id: row.id,
            name: row.name,
            description: row.description,
            priority: row.priority,
            status,
            project_id: row.project_id,
        })
    }
}
