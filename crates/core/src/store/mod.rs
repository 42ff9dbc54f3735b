//! Storage contract consumed by the services.
//!
//! Backends implement [`ProjectStore`], [`TaskStore`] and [`StoreHealth`].
//! Each method is one unit of work; the backend is responsible for
//! committing it atomically. Arguments have already been validated by the
//! service layer when these are called.

pub mod memory;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::filter::Filter;
use crate::models::{Project, ProjectInput, Task, TaskInput};
use crate::types::DbId;

pub use memory::MemoryStore;

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Projects matching `filter`, in its sort order.
    async fn list_projects(&self, filter: &Filter) -> Result<Vec<Project>, CoreError>;

    async fn find_project(&self, id: DbId) -> Result<Option<Project>, CoreError>;

    async fn project_exists(&self, id: DbId) -> Result<bool, CoreError>;

    /// Insert the project and any nested tasks together.
    async fn insert_project(&self, input: &ProjectInput) -> Result<Project, CoreError>;

    /// Overwrite every mutable field. Returns `None` if no row has `id`.
    async fn update_project(
        &self,
        id: DbId,
        input: &ProjectInput,
    ) -> Result<Option<Project>, CoreError>;

    /// Delete the project and its tasks. Returns `false` if no row has `id`.
    async fn delete_project(&self, id: DbId) -> Result<bool, CoreError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks matching `filter`, in its sort order.
    async fn list_tasks(&self, filter: &Filter) -> Result<Vec<Task>, CoreError>;

    async fn find_task(&self, id: DbId) -> Result<Option<Task>, CoreError>;

    async fn insert_task(&self, input: &TaskInput) -> Result<Task, CoreError>;

    /// Overwrite every mutable field. Returns `None` if no row has `id`.
    async fn update_task(&self, id: DbId, input: &TaskInput) -> Result<Option<Task>, CoreError>;

    /// Returns `false` if no row has `id`.
    async fn delete_task(&self, id: DbId) -> Result<bool, CoreError>;

    /// Point the task at another project. Returns `None` if no task has `id`.
    async fn set_task_project(
        &self,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Task>, CoreError>;
}

#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Cheap round-trip proving the backend is reachable.
    async fn ping(&self) -> Result<(), CoreError>;
}
