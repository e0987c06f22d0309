//! Account service over `/auth`.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use pn_core::account::{LoginRequest, RegisterRequest, User};
use pn_core::ports::{AccountPort, ServiceError};

use super::client::ApiClient;

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    role: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct HttpAccountService {
    client: ApiClient,
}

impl HttpAccountService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn user_by_email(&self, email: &str) -> Result<User, ServiceError> {
        let url = self.client.endpoint(&["users", "email", email]);
        self.client.get(url).await
    }
}

#[async_trait]
impl AccountPort for HttpAccountService {
    async fn register(&self, request: &RegisterRequest) -> Result<User, ServiceError> {
        let body = RegisterBody {
            name: &request.name,
            email: &request.email,
            username: &request.username,
            password: request.password.as_ref().map(|p| p.expose()),
            role: request.role.as_str(),
        };
        let url = self.client.endpoint(&["auth", "register"]);
        let user: User = self.client.post(url, Some(&body)).await?;
        info!(user_id = %user.id, "registered account");
        Ok(user)
    }

    /// Some backend builds answer a successful login with only the email;
    /// the full user is then fetched by email.
    async fn login(&self, request: &LoginRequest) -> Result<User, ServiceError> {
        let body = LoginBody {
            email: &request.email,
            password: request.password.expose(),
        };
        let url = self.client.endpoint(&["auth", "login"]);
        let value: Value = self.client.post(url, Some(&body)).await?;

        if value.get("id").is_some() {
            return serde_json::from_value(value).map_err(|e| {
                ServiceError::InvalidResponse(format!("unexpected login response: {e}"))
            });
        }
        match value.get("email").and_then(Value::as_str) {
            Some(email) => {
                debug!("login response carried no user, fetching by email");
                self.user_by_email(email).await
            }
            None => Err(ServiceError::InvalidResponse(
                "login response carried no user".to_string(),
            )),
        }
    }
}
