//! Vacancies and the responses (applications) sent to them.

use store::models::{Id, ResponseStatus, Vacancy, VacancyResponse};
use store::wizard::NewVacancy;
use tracing::info;

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{ListPayload, NewResponse, ResponseStatusUpdate, UpdateVacancy};

pub struct VacanciesClient<'a> {
    client: &'a ApiClient,
}

impl<'a> VacanciesClient<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Vacancies of one project.
    pub async fn list(&self, project_id: Id) -> Result<Vec<Vacancy>> {
        let query = vec![("project".to_string(), project_id.to_string())];
        let payload: ListPayload<Vacancy> = self.client.get("vacancies", query).await?;
        Ok(payload.into_vec())
    }

    pub async fn get(&self, id: Id) -> Result<Vacancy> {
        self.client.get(&format!("vacancies/{id}"), Vec::new()).await
    }

    pub async fn create(&self, vacancy: &NewVacancy) -> Result<Vacancy> {
        let created: Vacancy = self.client.post("vacancies", vacancy).await?;
        info!(
            vacancy_id = created.id,
            project_id = created.project_id,
            "Vacancy created"
        );
        Ok(created)
    }

    pub async fn update(&self, id: Id, update: &UpdateVacancy) -> Result<Vacancy> {
        self.client.patch(&format!("vacancies/{id}"), update).await
    }

    /// Stop accepting applications.
    pub async fn close(&self, id: Id) -> Result<Vacancy> {
        let update = UpdateVacancy {
            is_open: Some(false),
            ..UpdateVacancy::default()
        };
        self.update(id, &update).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&format!("vacancies/{id}")).await
    }

    /// Applications received for a vacancy (owner only).
    pub async fn responses(&self, vacancy_id: Id) -> Result<Vec<VacancyResponse>> {
        let payload: ListPayload<VacancyResponse> = self
            .client
            .get(&format!("vacancies/{vacancy_id}/responses"), Vec::new())
            .await?;
        Ok(payload.into_vec())
    }

    /// Apply to a vacancy.
    pub async fn respond(&self, vacancy_id: Id, response: &NewResponse) -> Result<VacancyResponse> {
        let created: VacancyResponse = self
            .client
            .post(&format!("vacancies/{vacancy_id}/responses"), response)
            .await?;
        info!(vacancy_id, response_id = created.id, "Application sent");
        Ok(created)
    }

    /// Accept or reject an application.
    pub async fn set_response_status(
        &self,
        response_id: Id,
        status: ResponseStatus,
    ) -> Result<VacancyResponse> {
        self.client
            .patch(
                &format!("responses/{response_id}"),
                &ResponseStatusUpdate { status },
            )
            .await
    }

    /// Applications sent by the signed-in user.
    pub async fn my_responses(&self) -> Result<Vec<VacancyResponse>> {
        let payload: ListPayload<VacancyResponse> =
            self.client.get("responses/mine", Vec::new()).await?;
        Ok(payload.into_vec())
    }
}
