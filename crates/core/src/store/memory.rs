//! In-process storage backend.
//!
//! Used when no database is configured and by the service tests. Both
//! tables live behind a single lock, so every operation is atomic with
//! respect to the others. Ids are assigned sequentially from 1.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::filter::Filter;
use crate::models::{Project, ProjectInput, Task, TaskInput};
use crate::store::{ProjectStore, StoreHealth, TaskStore};
use crate::types::DbId;

/// Constraint violations raised by [`MemoryStore`], mirroring the database's foreign key.
#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("task references missing project {0}")]
    MissingProject(DbId),
}

#[derive(Debug, Default)]
struct Tables {
    projects: BTreeMap<DbId, Project>,
    tasks: BTreeMap<DbId, Task>,
    last_project_id: DbId,
    last_task_id: DbId,
}

impl Tables {
    fn insert_task(&mut self, input: &TaskInput) -> Result<Task, CoreError> {
        if !self.projects.contains_key(&input.project_id) {
            return Err(CoreError::storage(MemoryStoreError::MissingProject(
                input.project_id,
            )));
        }
        self.last_task_id += 1;
        let task = Task {
            id: self.last_task_id,
            name: input.name.clone(),
            description: input.description.clone(),
            priority: input.priority,
            status: input.status,
            project_id: input.project_id,
        };
        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }
}

/// Cheaply cloneable handle to a shared in-memory database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list_projects(&self, filter: &Filter) -> Result<Vec<Project>, CoreError> {
        let tables = self.tables.read().await;
        Ok(filter.apply(tables.projects.values()))
    }

    async fn find_project(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn project_exists(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.tables.read().await.projects.contains_key(&id))
    }

    async fn insert_project(&self, input: &ProjectInput) -> Result<Project, CoreError> {
        let mut tables = self.tables.write().await;

        tables.last_project_id += 1;
        let project = Project {
            id: tables.last_project_id,
            name: input.name.clone(),
            start_date: input.start_date,
            complete_date: input.complete_date,
            priority: input.priority,
            status: input.status,
        };
        tables.projects.insert(project.id, project.clone());

        // Nested tasks reference the row just inserted, so they cannot fail the FK check.
        for task in &input.tasks {
            tables.insert_task(&task.clone().into_task_input(project.id))?;
        }
        Ok(project)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &ProjectInput,
    ) -> Result<Option<Project>, CoreError> {
        let mut tables = self.tables.write().await;
        let Some(project) = tables.projects.get_mut(&id) else {
            return Ok(None);
        };
        project.name = input.name.clone();
        project.start_date = input.start_date;
        project.complete_date = input.complete_date;
        project.priority = input.priority;
        project.status = input.status;
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        if tables.projects.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tasks.retain(|_, task| task.project_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, filter: &Filter) -> Result<Vec<Task>, CoreError> {
        let tables = self.tables.read().await;
        Ok(filter.apply(tables.tasks.values()))
    }

    async fn find_task(&self, id: DbId) -> Result<Option<Task>, CoreError> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn insert_task(&self, input: &TaskInput) -> Result<Task, CoreError> {
        self.tables.write().await.insert_task(input)
    }

    async fn update_task(&self, id: DbId, input: &TaskInput) -> Result<Option<Task>, CoreError> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&input.project_id) {
            return Err(CoreError::storage(MemoryStoreError::MissingProject(
                input.project_id,
            )));
        }
        let Some(task) = tables.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.name = input.name.clone();
        task.description = input.description.clone();
        task.priority = input.priority;
        task.status = input.status;
        task.project_id = input.project_id;
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }

    async fn set_task_project(
        &self,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Task>, CoreError> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&project_id) {
            return Err(CoreError::storage(MemoryStoreError::MissingProject(
                project_id,
            )));
        }
        let Some(task) = tables.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.project_id = project_id;
        Ok(Some(task.clone()))
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
