use secrecy::{ExposeSecret, Secret};
use serde_json::json;

use crate::error::{ClientError, Operation};
use crate::http::ApiClient;
use crate::models::user::CurrentUserResponse;
use crate::models::{AuthResponse, User};

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const ME_PATH: &str = "/api/auth/me";

pub struct AuthGateway {
    client: ApiClient,
}

impl AuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &Secret<String>,
    ) -> Result<AuthResponse, ClientError> {
        let body = json!({
            "name": name,
            "email": email,
            "password": password.expose_secret(),
        });

        let response: AuthResponse = self
            .client
            .send_json(Operation::Register, self.client.post(REGISTER_PATH).json(&body))
            .await?;

        tracing::info!(user_id = %response.user.id, "Account registered");
        Ok(response)
    }

    pub async fn login(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<AuthResponse, ClientError> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let response: AuthResponse = self
            .client
            .send_json(Operation::Login, self.client.post(LOGIN_PATH).json(&body))
            .await?;

        tracing::info!(user_id = %response.user.id, "Credentials accepted");
        Ok(response)
    }

    /// Who the current bearer token belongs to.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let response: CurrentUserResponse = self
            .client
            .send_json(Operation::CurrentUser, self.client.get(ME_PATH))
            .await?;
        Ok(response.into_user())
    }
}
