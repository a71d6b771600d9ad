//! Project endpoints.

use store::models::{Id, Project};
use store::wizard::NewProject;
use tracing::info;

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{ListPayload, ProjectQuery, UpdateProject};

pub struct ProjectsClient<'a> {
    client: &'a ApiClient,
}

impl<'a> ProjectsClient<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Browse projects. Unset filters are left to the client-side filter.
    pub async fn list(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        let payload: ListPayload<Project> = self.client.get("projects", query.params()).await?;
        Ok(payload.into_vec())
    }

    pub async fn get(&self, id: Id) -> Result<Project> {
        self.client.get(&format!("projects/{id}"), Vec::new()).await
    }

    pub async fn create(&self, project: &NewProject) -> Result<Project> {
        let created: Project = self.client.post("projects", project).await?;
        info!(project_id = created.id, title = %created.title, "Project created");
        Ok(created)
    }

    pub async fn update(&self, id: Id, update: &UpdateProject) -> Result<Project> {
        self.client.patch(&format!("projects/{id}"), update).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&format!("projects/{id}")).await?;
        info!(project_id = id, "Project deleted");
        Ok(())
    }
}
