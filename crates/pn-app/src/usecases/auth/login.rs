//! Use case for signing in with email and password
//! 邮箱密码登录用例

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use pn_core::account::{LoginRequest, SignedInIdentity};
use pn_core::ports::{AccountPort, IdentityStorePort, ServiceError};
use pn_core::security::SecretString;
use pn_core::signup::validation::validate_email;
use pn_core::signup::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Backend message, shown verbatim.
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}

/// Use case for signing a user in.
///
/// ## Behavior / 行为
/// - Validates the email shape before any network call
/// - Authenticates against the account service
/// - Persists the signed-in identity
///
/// Unlike signup, a login whose identity cannot be saved is reported as a
/// failure: the host would not remember the user on the next launch.
pub struct LoginUser {
    accounts: Arc<dyn AccountPort>,
    identity_store: Arc<dyn IdentityStorePort>,
}

impl LoginUser {
    pub fn new(accounts: Arc<dyn AccountPort>, identity_store: Arc<dyn IdentityStorePort>) -> Self {
        Self {
            accounts,
            identity_store,
        }
    }

    pub async fn execute(
        &self,
        email: &str,
        password: SecretString,
    ) -> Result<SignedInIdentity, LoginError> {
        let span = info_span!("usecase.login_user.execute");
        self.sign_in(email, password).instrument(span).await
    }

    async fn sign_in(
        &self,
        email: &str,
        password: SecretString,
    ) -> Result<SignedInIdentity, LoginError> {
        validate_email(email)?;
        if password.is_empty() {
            return Err(ValidationError::password_too_short().into());
        }

        let request = LoginRequest {
            email: email.to_string(),
            password,
        };
        let user = self.accounts.login(&request).await.map_err(|err| {
            warn!(error = %err, "login rejected");
            err
        })?;

        let identity = SignedInIdentity::now(user);
        self.identity_store.save(&identity).await?;
        info!(user_id = %identity.user.id, "user signed in");
        Ok(identity)
    }
}
