use store::models::{Id, User};

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::UpdateProfile;

/// `users/*` endpoints.
pub struct UsersClient<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// The signed-in user.
    pub async fn me(&self) -> Result<User> {
        self.client.get("users/me", Vec::new()).await
    }

    pub async fn update_me(&self, update: &UpdateProfile) -> Result<User> {
        self.client.patch("users/me", update).await
    }

    pub async fn get(&self, id: Id) -> Result<User> {
        self.client.get(&format!("users/{id}"), Vec::new()).await
    }
}
