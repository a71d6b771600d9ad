//! Authentication endpoints.

use reqwest::Method;
use store::tokens::TokenPair;
use tracing::{debug, info, warn};

use crate::client::{decode, ApiClient, RequestSpec};
use crate::error::{ApiError, Result};
use crate::types::{AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest};

/// Login, registration and token lifecycle.
pub struct AuthClient<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Login with email and password.
    ///
    /// On success the tokens are stored for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        debug!(email = %email, "Attempting login");
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let spec = RequestSpec::new(Method::POST, "auth/login").json(&request)?;

        let response: AuthResponse = match self.client.send_public(&spec).await {
            Ok(body) => decode(&body)?,
            Err(e) => {
                warn!(error = %e, "Login failed");
                return Err(e);
            }
        };
        self.client.tokens().set_tokens(&response.tokens());
        info!(email = %email, "Login successful");
        Ok(response)
    }

    /// Create an account. Tokens in the response, if any, sign the user in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<AuthResponse>> {
        debug!(email = %request.email, username = %request.username, "Registering account");
        let spec = RequestSpec::new(Method::POST, "auth/register").json(request)?;
        let body = self.client.send_public(&spec).await?;

        // Some deployments answer with the created user only.
        let response = serde_json::from_str::<AuthResponse>(&body).ok();
        match &response {
            Some(auth) => {
                self.client.tokens().set_tokens(&auth.tokens());
                info!(username = %request.username, "Registered and signed in");
            }
            None => info!(username = %request.username, "Registered"),
        }
        Ok(response)
    }

    /// Exchange the refresh token for a new access token and store it.
    pub async fn refresh(&self, refresh_token: &str) -> Result<()> {
        debug!("Refreshing access token");
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let spec = RequestSpec::new(Method::POST, "auth/refresh").json(&request)?;

        let body = self.client.send_public(&spec).await.map_err(|e| match e {
            ApiError::AuthFailed(_) => ApiError::Unauthorized,
            other => other,
        })?;
        let response: RefreshResponse = decode(&body)?;

        self.client.tokens().set_tokens(&TokenPair {
            access_token: response.access_token,
            refresh_token: response
                .refresh_token
                .or_else(|| Some(refresh_token.to_string())),
        });
        info!("Access token refreshed");
        Ok(())
    }

    /// Revoke the session server-side (best effort) and clear stored tokens.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.client.tokens().refresh_token() {
            let request = RefreshRequest { refresh_token };
            let result = match RequestSpec::new(Method::POST, "auth/logout").json(&request) {
                Ok(spec) => self.client.send_public(&spec).await.map(|_| ()),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                debug!(error = %e, "Server-side logout failed");
            }
        }
        self.client.tokens().clear();
        info!("Logged out");
    }
}
