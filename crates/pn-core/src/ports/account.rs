use async_trait::async_trait;

use super::errors::ServiceError;
use crate::account::{LoginRequest, RegisterRequest, User};

#[async_trait]
pub trait AccountPort: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<User, ServiceError>;

    async fn login(&self, request: &LoginRequest) -> Result<User, ServiceError>;
}
