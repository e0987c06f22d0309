//! Use cases for the signed-in identity
//! 当前登录身份用例

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use pn_core::account::SignedInIdentity;
use pn_core::ports::IdentityStorePort;

/// Returns the identity remembered from a previous signup or login.
pub struct GetCurrentUser {
    identity_store: Arc<dyn IdentityStorePort>,
}

impl GetCurrentUser {
    pub fn new(identity_store: Arc<dyn IdentityStorePort>) -> Self {
        Self { identity_store }
    }

    /// # Returns / 返回值
    /// - `Ok(None)` when nobody is signed in
    pub async fn execute(&self) -> Result<Option<SignedInIdentity>> {
        self.identity_store
            .load()
            .await
            .context("failed to load signed-in identity")
    }
}

/// Forgets the signed-in identity.
pub struct LogoutUser {
    identity_store: Arc<dyn IdentityStorePort>,
}

impl LogoutUser {
    pub fn new(identity_store: Arc<dyn IdentityStorePort>) -> Self {
        Self { identity_store }
    }

    pub async fn execute(&self) -> Result<()> {
        self.identity_store
            .clear()
            .await
            .context("failed to clear signed-in identity")?;
        info!("user signed out");
        Ok(())
    }
}
