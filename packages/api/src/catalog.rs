//! Tags and technologies.

use store::models::{Tag, Technology};

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::ListPayload;

pub struct CatalogClient<'a> {
    client: &'a ApiClient,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn tags(&self, search: Option<&str>) -> Result<Vec<Tag>> {
        let payload: ListPayload<Tag> = self.client.get("tags", search_params(search)).await?;
        Ok(payload.into_vec())
    }

    pub async fn technologies(&self, search: Option<&str>) -> Result<Vec<Technology>> {
        let payload: ListPayload<Technology> = self
            .client
            .get("technologies", search_params(search))
            .await?;
        Ok(payload.into_vec())
    }
}

fn search_params(search: Option<&str>) -> Vec<(String, String)> {
    match search.map(str::trim) {
        Some(text) if !text.is_empty() => vec![("search".to_string(), text.to_string())],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params() {
        assert!(search_params(None).is_empty());
        assert!(search_params(Some("  ")).is_empty());
        assert_eq!(
            search_params(Some(" ru ")),
            vec![("search".to_string(), "ru".to_string())]
        );
    }
}
