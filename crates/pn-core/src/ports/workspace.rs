use async_trait::async_trait;

use super::errors::ServiceError;
use crate::workspace::{CreateWorkspaceRequest, JoinedWorkspace, Workspace};

#[async_trait]
pub trait WorkspacePort: Send + Sync {
    /// Create a workspace using the payload shape carried by `request`.
    async fn create_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<Workspace, ServiceError>;

    async fn join_workspace(
        &self,
        workspace_id: &str,
        user_id: &str,
    ) -> Result<JoinedWorkspace, ServiceError>;
}
