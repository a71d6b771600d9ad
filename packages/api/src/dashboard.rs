use store::models::{DashboardStats, Project, VacancyResponse};

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::ListPayload;

/// `dashboard/*` aggregates for the signed-in user.
pub struct DashboardClient<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardClient<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.client.get("dashboard/stats", Vec::new()).await
    }

    pub async fn projects(&self) -> Result<Vec<Project>> {
        let payload: ListPayload<Project> =
            self.client.get("dashboard/projects", Vec::new()).await?;
        Ok(payload.into_vec())
    }

    /// Latest applications received on the user's vacancies.
    pub async fn responses(&self) -> Result<Vec<VacancyResponse>> {
        let payload: ListPayload<VacancyResponse> =
            self.client.get("dashboard/responses", Vec::new()).await?;
        Ok(payload.into_vec())
    }
}
