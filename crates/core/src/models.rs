//! Entity structs and input DTOs.
//!
//! Entities are what the stores return and the API serializes. Input DTOs
//! are what clients send on create/update; they carry their own
//! constraint checks via [`validator::Validate`].

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::filter::{Field, Filterable, Value};
use crate::status::{ProjectStatus, TaskStatus};
use crate::types::{DbId, Priority, Timestamp};
use crate::validation::validate_project_schedule;

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A persisted project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub start_date: Timestamp,
    pub complete_date: Timestamp,
    pub priority: Priority,
    pub status: ProjectStatus,
}

impl Filterable for Project {
    fn id(&self) -> DbId {
        self.id
    }

    fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::Id => Some(Value::Id(self.id)),
            Field::Name => Some(Value::Text(self.name.clone())),
            Field::Priority => Some(Value::Int(self.priority)),
            Field::Status => Some(self.status.into()),
            Field::StartDate => Some(Value::Timestamp(self.start_date)),
            Field::CompleteDate => Some(Value::Timestamp(self.complete_date)),
            Field::ProjectId => None,
        }
    }
}

/// Payload for creating or fully overwriting a project.
///
/// `tasks` is only honoured on create, where the tasks are inserted in the
/// same unit of work as the project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_project_schedule"))]
pub struct ProjectInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub start_date: Timestamp,
    pub complete_date: Timestamp,
    #[validate(range(max = 5, message = "priority must be less than 6"))]
    pub priority: Priority,
    pub status: ProjectStatus,
    #[serde(default)]
    #[validate(nested)]
    pub tasks: Vec<ProjectTaskInput>,
}

/// A task created together with its project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectTaskInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(max = 5, message = "priority must be less than 6"))]
    pub priority: Priority,
    pub status: TaskStatus,
}

impl ProjectTaskInput {
    /// Attach the owning project id.
    pub fn into_task_input(self, project_id: DbId) -> TaskInput {
        TaskInput {
            name: self.name,
            description: self.description,
            priority: self.priority,
            status: self.status,
            project_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub project_id: DbId,
}

impl Filterable for Task {
    fn id(&self) -> DbId {
        self.id
    }

    fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::Id => Some(Value::Id(self.id)),
            Field::Name => Some(Value::Text(self.name.clone())),
            Field::Priority => Some(Value::Int(self.priority)),
            Field::Status => Some(self.status.into()),
            Field::ProjectId => Some(Value::Id(self.project_id)),
            Field::StartDate | Field::CompleteDate => None,
        }
    }
}

/// Payload for creating or fully overwriting a task.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(max = 5, message = "priority must be less than 6"))]
    pub priority: Priority,
    pub status: TaskStatus,
    #[validate(range(min = 1, message = "project_id must be greater than 0"))]
    pub project_id: DbId,
}
