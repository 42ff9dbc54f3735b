use std::sync::Arc;

use crate::error::CoreError;
use crate::filter::ProjectQuery;
use crate::models::{Project, ProjectInput};
use crate::store::ProjectStore;
use crate::types::DbId;
use crate::validation::{ensure_valid_id, require, validate_input};

/// CRUD operations over projects.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Projects matching the query's filters, in its sort order (id ascending by default).
    pub async fn list(&self, query: &ProjectQuery) -> Result<Vec<Project>, CoreError> {
        self.store.list_projects(&query.to_filter()).await
    }

    /// Look up a project. `Ok(None)` means no such row.
    pub async fn get(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        ensure_valid_id(id)?;
        self.store.find_project(id).await
    }

    /// Create a project together with any nested tasks.
    pub async fn create(&self, input: Option<ProjectInput>) -> Result<Project, CoreError> {
        let input = require(input, "project")?;
        validate_input(&input)?;

        let project = self.store.insert_project(&input).await?;
        tracing::info!(
            id = project.id,
            name = %project.name,
            tasks = input.tasks.len(),
            "Project created"
        );
        Ok(project)
    }

    /// Overwrite every mutable field of an existing project. Nested tasks are ignored.
    pub async fn update(
        &self,
        id: DbId,
        input: Option<ProjectInput>,
    ) -> Result<Project, CoreError> {
        ensure_valid_id(id)?;
        let input = require(input, "project")?;
        validate_input(&input)?;

        let project = self
            .store
            .update_project(id, &input)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id,
            })?;
        tracing::info!(id, "Project updated");
        Ok(project)
    }

    /// Delete a project and, by cascade, its tasks.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        ensure_valid_id(id)?;
        if !self.store.delete_project(id).await? {
            return Err(CoreError::NotFound {
                entity: "Project",
                id,
            });
        }
        tracing::info!(id, "Project deleted");
        Ok(())
    }
}
