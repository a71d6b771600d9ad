use store::models::{Id, Question};
use store::wizard::NewQuestion;

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::ListPayload;

/// Screening questions attached to vacancies.
pub struct QuestionsClient<'a> {
    client: &'a ApiClient,
}

impl<'a> QuestionsClient<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, vacancy_id: Id) -> Result<Vec<Question>> {
        let query = vec![("vacancy".to_string(), vacancy_id.to_string())];
        let payload: ListPayload<Question> = self.client.get("questions", query).await?;
        Ok(payload.into_vec())
    }

    /// `question.vacancy_id` must be set.
    pub async fn create(&self, question: &NewQuestion) -> Result<Question> {
        self.client.post("questions", question).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&format!("questions/{id}")).await
    }
}
