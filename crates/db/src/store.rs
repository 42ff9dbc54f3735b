//! [`PgStore`]: the storage traits backed by PostgreSQL.

use async_trait::async_trait;
use tasktracker_core::error::CoreError;
use tasktracker_core::filter::Filter;
use tasktracker_core::models::{Project, ProjectInput, Task, TaskInput};
use tasktracker_core::store::{ProjectStore, StoreHealth, TaskStore};
use tasktracker_core::types::DbId;

use crate::repositories::{ProjectRepo, TaskRepo};
use crate::DbPool;

/// Cheaply cloneable handle around the connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn collect<R, T>(rows: Vec<R>) -> Result<Vec<T>, CoreError>
where
    T: TryFrom<R, Error = CoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

fn convert<R, T>(row: Option<R>) -> Result<Option<T>, CoreError>
where
    T: TryFrom<R, Error = CoreError>,
{
    row.map(T::try_from).transpose()
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn list_projects(&self, filter: &Filter) -> Result<Vec<Project>, CoreError> {
        let rows = ProjectRepo::list(&self.pool, filter)
            .await
            .map_err(CoreError::storage)?;
        collect(rows)
    }

    async fn find_project(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        let row = ProjectRepo::find_by_id(&self.pool, id)
            .await
            .map_err(CoreError::storage)?;
        convert(row)
    }

    async fn project_exists(&self, id: DbId) -> Result<bool, CoreError> {
        ProjectRepo::exists(&self.pool, id)
            .await
            .map_err(CoreError::storage)
    }

    async fn insert_project(&self, input: &ProjectInput) -> Result<Project, CoreError> {
        let row = ProjectRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::storage)?;
        Project::try_from(row)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &ProjectInput,
    ) -> Result<Option<Project>, CoreError> {
        let row = ProjectRepo::update(&self.pool, id, input)
            .await
            .map_err(CoreError::storage)?;
        convert(row)
    }

    async fn delete_project(&self, id: DbId) -> Result<bool, CoreError> {
        ProjectRepo::delete(&self.pool, id)
            .await
            .map_err(CoreError::storage)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_tasks(&self, filter: &Filter) -> Result<Vec<Task>, CoreError> {
        let rows = TaskRepo::list(&self.pool, filter)
            .await
            .map_err(CoreError::storage)?;
        collect(rows)
    }

    async fn find_task(&self, id: DbId) -> Result<Option<Task>, CoreError> {
        let row = TaskRepo::find_by_id(&self.pool, id)
            .await
            .map_err(CoreError::storage)?;
        convert(row)
    }

    async fn insert_task(&self, input: &TaskInput) -> Result<Task, CoreError> {
        let row = TaskRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::storage)?;
        Task::try_from(row)
    }

    async fn update_task(&self, id: DbId, input: &TaskInput) -> Result<Option<Task>, CoreError> {
        let row = TaskRepo::update(&self.pool, id, input)
            .await
            .map_err(CoreError::storage)?;
        convert(row)
    }

    async fn delete_task(&self, id: DbId) -> Result<bool, CoreError> {
        TaskRepo::delete(&self.pool, id)
            .await
            .map_err(CoreError::storage)
    }

    async fn set_task_project(
        &self,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Task>, CoreError> {
        let row = TaskRepo::set_project(&self.pool, id, project_id)
            .await
            .map_err(CoreError::storage)?;
        convert(row)
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(CoreError::storage)
    }
}
