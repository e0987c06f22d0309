//! File-based signed-in identity repository
//!
//! Keeps the "current signed-in user" record in a local JSON file so the host
//! can restore it on the next launch.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use pn_core::account::SignedInIdentity;
use pn_core::ports::IdentityStorePort;

pub const DEFAULT_IDENTITY_FILE: &str = "identity.json";

pub struct FileIdentityRepository {
    identity_file_path: PathBuf,
}

impl FileIdentityRepository {
    /// Create repository with custom file path
    pub fn new(identity_file_path: PathBuf) -> Self {
        Self { identity_file_path }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            identity_file_path: base_dir.join(DEFAULT_IDENTITY_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.identity_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityStorePort for FileIdentityRepository {
    async fn load(&self) -> anyhow::Result<Option<SignedInIdentity>> {
        let content = match fs::read_to_string(&self.identity_file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(anyhow::anyhow!("Failed to read identity file: {e}")),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let identity: SignedInIdentity = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse identity file: {e}"))?;

        Ok(Some(identity))
    }

    async fn save(&self, identity: &SignedInIdentity) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(identity)
            .map_err(|e| anyhow::anyhow!("Failed to serialize identity: {e}"))?;

        let mut file = fs::File::create(&self.identity_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create identity file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write identity file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync identity file: {e}"))?;

        debug!(path = %self.identity_file_path.display(), "signed-in identity saved");
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.identity_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove identity file: {e}")),
        }
    }
}
