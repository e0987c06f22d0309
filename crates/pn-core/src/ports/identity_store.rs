//! Signed-in identity port
//!
//! This port defines the contract for keeping the "current signed-in user"
//! record between launches. The storage mechanism belongs to the host.

use async_trait::async_trait;

use crate::account::SignedInIdentity;

#[async_trait]
pub trait IdentityStorePort: Send + Sync {
    /// `None` when nobody is signed in.
    async fn load(&self) -> anyhow::Result<Option<SignedInIdentity>>;

    async fn save(&self, identity: &SignedInIdentity) -> anyhow::Result<()>;

    /// Idempotent.
    async fn clear(&self) -> anyhow::Result<()>;
}
