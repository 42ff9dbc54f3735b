#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;
use chrono::{Duration, TimeZone, Utc};

use tasktracker_core::error::CoreError;
use tasktracker_core::filter::Filter;
use tasktracker_core::models::{Project, ProjectInput, Task, TaskInput};
use tasktracker_core::services::{ProjectService, TaskService};
use tasktracker_core::status::{ProjectStatus, TaskStatus};
use tasktracker_core::store::{MemoryStore, ProjectStore, TaskStore};
use tasktracker_core::types::{DbId, Priority};

/// Services wired to one shared in-memory store.
pub fn services() -> (ProjectService, TaskService) {
    let store = Arc::new(MemoryStore::new());
    (
        ProjectService::new(store.clone()),
        TaskService::new(store.clone(), store),
    )
}

pub fn project_input(name: &str, priority: Priority, status: ProjectStatus) -> ProjectInput {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    ProjectInput {
        name: name.into(),
        start_date: start,
        complete_date: start + Duration::days(30),
        priority,
        status,
        tasks: Vec::new(),
    }
}

pub fn task_input(name: &str, priority: Priority, project_id: DbId) -> TaskInput {
    TaskInput {
        name: name.into(),
        description: Some(format!("{name} description")),
        priority,
        status: TaskStatus::ToDo,
        project_id,
    }
}

/// A store that fails the test if it is touched at all.
pub struct UntouchableStore;

#[async_trait]
impl ProjectStore for UntouchableStore {
    async fn list_projects(&self, _: &Filter) -> Result<Vec<Project>, CoreError> {
        panic!("store accessed")
    }
    async fn find_project(&self, _: DbId) -> Result<Option<Project>, CoreError> {
        panic!("store accessed")
    }
    async fn project_exists(&self, _: DbId) -> Result<bool, CoreError> {
        panic!("store accessed")
    }
    async fn insert_project(&self, _: &ProjectInput) -> Result<Project, CoreError> {
        panic!("store accessed")
    }
    async fn update_project(&self, _: DbId, _: &ProjectInput) -> Result<Option<Project>, CoreError> {
        panic!("store accessed")
    }
    async fn delete_project(&self, _: DbId) -> Result<bool, CoreError> {
        panic!("store accessed")
    }
}

#[async_trait]
impl TaskStore for UntouchableStore {
    async fn list_tasks(&self, _: &Filter) -> Result<Vec<Task>, CoreError> {
        panic!("store accessed")
    }
    async fn find_task(&self, _: DbId) -> Result<Option<Task>, CoreError> {
        panic!("store accessed")
    }
    async fn insert_task(&self, _: &TaskInput) -> Result<Task, CoreError> {
        panic!("store accessed")
    }
    async fn update_task(&self, _: DbId, _: &TaskInput) -> Result<Option<Task>, CoreError> {
        panic!("store accessed")
    }
    async fn delete_task(&self, _: DbId) -> Result<bool, CoreError> {
        panic!("store accessed")
    }
    async fn set_task_project(&self, _: DbId, _: DbId) -> Result<Option<Task>, CoreError> {
        panic!("store accessed")
    }
}

/// Services whose store panics on use.
pub fn untouchable_services() -> (ProjectService, TaskService) {
    let store = Arc::new(UntouchableStore);
    (
        ProjectService::new(store.clone()),
        TaskService::new(store.clone(), store),
    )
}

/// A store whose task lookup and project existence check each wait for the
/// other to start, so they only complete when awaited concurrently.
#[derive(Default)]
pub struct RendezvousStore {
    task_looked_up: Notify,
    project_checked: Notify,
}

impl RendezvousStore {
    fn task(id: DbId, project_id: DbId) -> Task {
        Task {
            id,
            name: "rendezvous".into(),
            description: None,
            priority: 1,
            status: TaskStatus::ToDo,
            project_id,
        }
    }
}

#[async_trait]
impl ProjectStore for RendezvousStore {
    async fn list_projects(&self, _: &Filter) -> Result<Vec<Project>, CoreError> {
        panic!("unexpected call")
    }
    async fn find_project(&self, _: DbId) -> Result<Option<Project>, CoreError> {
        panic!("unexpected call")
    }
    async fn project_exists(&self, _: DbId) -> Result<bool, CoreError> {
        self.project_checked.notify_one();
        self.task_looked_up.notified().await;
        Ok(true)
    }
    async fn insert_project(&self, _: &ProjectInput) -> Result<Project, CoreError> {
        panic!("unexpected call")
    }
    async fn update_project(&self, _: DbId, _: &ProjectInput) -> Result<Option<Project>, CoreError> {
        panic!("unexpected call")
    }
    async fn delete_project(&self, _: DbId) -> Result<bool, CoreError> {
        panic!("unexpected call")
    }
}

#[async_trait]
impl TaskStore for RendezvousStore {
    async fn list_tasks(&self, _: &Filter) -> Result<Vec<Task>, CoreError> {
        panic!("unexpected call")
    }
    async fn find_task(&self, id: DbId) -> Result<Option<Task>, CoreError> {
        self.task_looked_up.notify_one();
        self.project_checked.notified().await;
        Ok(Some(Self::task(id, 1)))
    }
    async fn insert_task(&self, _: &TaskInput) -> Result<Task, CoreError> {
        panic!("unexpected call")
    }
    async fn update_task(&self, _: DbId, _: &TaskInput) -> Result<Option<Task>, CoreError> {
        panic!("unexpected call")
    }
    async fn delete_task(&self, _: DbId) -> Result<bool, CoreError> {
        panic!("unexpected call")
    }
    async fn set_task_project(&self, id: DbId, project_id: DbId) -> Result<Option<Task>, CoreError> {
        Ok(Some(Self::task(id, project_id)))
    }
}

/// Task service over a [`RendezvousStore`].
pub fn rendezvous_task_service() -> TaskService {
    let store = Arc::new(RendezvousStore::default());
    TaskService::new(store.clone(), store)
}
