use std::sync::Arc;

use crate::error::CoreError;
use crate::filter::TaskQuery;
use crate::models::{Task, TaskInput};
use crate::store::{ProjectStore, TaskStore};
use crate::types::DbId;
use crate::validation::{ensure_valid_id, require, validate_input};

/// CRUD operations over tasks, plus moving a task between projects.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    projects: Arc<dyn ProjectStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>, projects: Arc<dyn ProjectStore>) -> Self {
        Self { tasks, projects }
    }

    /// Tasks matching the query's filters, in its sort order (id ascending by default).
    pub async fn list(&self, query: &TaskQuery) -> Result<Vec<Task>, CoreError> {
        self.tasks.list_tasks(&query.to_filter()).await
    }

    /// Look up a task. `Ok(None)` means no such row.
    pub async fn get(&self, id: DbId) -> Result<Option<Task>, CoreError> {
        ensure_valid_id(id)?;
        self.tasks.find_task(id).await
    }

    pub async fn create(&self, input: Option<TaskInput>) -> Result<Task, CoreError> {
        let input = require(input, "task")?;
        validate_input(&input)?;
        self.ensure_project_exists(input.project_id).await?;

        let task = self.tasks.insert_task(&input).await?;
        tracing::info!(id = task.id, project_id = task.project_id, "Task created");
        Ok(task)
    }

    /// Overwrite every mutable field of an existing task, including its project.
    pub async fn update(&self, id: DbId, input: Option<TaskInput>) -> Result<Task, CoreError> {
        ensure_valid_id(id)?;
        let input = require(input, "task")?;
        validate_input(&input)?;
        self.ensure_project_exists(input.project_id).await?;

        let task = self
            .tasks
            .update_task(id, &input)
            .await?
            .ok_or(CoreError::NotFound { entity: "Task", id })?;
        tracing::info!(id, "Task updated");
        Ok(task)
    }

    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        ensure_valid_id(id)?;
        if !self.tasks.delete_task(id).await? {
            return Err(CoreError::NotFound { entity: "Task", id });
        }
        tracing::info!(id, "Task deleted");
        Ok(())
    }

    /// Move a task to another project.
    ///
    /// The task lookup and the project existence check run concurrently;
    /// if either comes back empty the call fails with
    /// [`CoreError::InvalidOperation`].
    pub async fn change_project(&self, task_id: DbId, project_id: DbId) -> Result<Task, CoreError> {
        ensure_valid_id(task_id)?;
        ensure_valid_id(project_id)?;

        let (task, project_exists) = futures::try_join!(
            self.tasks.find_task(task_id),
            self.projects.project_exists(project_id),
        )?;

        if task.is_none() || !project_exists {
            return Err(CoreError::InvalidOperation(format!(
                "cannot move task {task_id} to project {project_id}: task or project does not exist"
            )));
        }

        let task = self
            .tasks
            .set_task_project(task_id, project_id)
            .await?
            .ok_or_else(|| {
                CoreError::InvalidOperation(format!("task {task_id} was removed concurrently"))
            })?;
        tracing::info!(task_id, project_id, "Task moved to project");
        Ok(task)
    }

    async fn ensure_project_exists(&self, project_id: DbId) -> Result<(), CoreError> {
        if !self.projects.project_exists(project_id).await? {
            return Err(CoreError::InvalidOperation(format!(
                "project {project_id} does not exist"
            )));
        }
        Ok(())
    }
}
