use async_trait::async_trait;

use super::errors::ServiceError;
use crate::workspace::WorkspaceRelation;

/// User↔workspace relations.
#[async_trait]
pub trait RelationPort: Send + Sync {
    async fn create_owner_relation(
        &self,
        user_id: &str,
        workspace_id: &str,
    ) -> Result<WorkspaceRelation, ServiceError>;

    /// Signup joins students through [`WorkspacePort::join_workspace`](super::WorkspacePort::join_workspace)
    /// instead, which also returns the workspace.
    async fn join_as_student(
        &self,
        user_id: &str,
        workspace_id: &str,
    ) -> Result<WorkspaceRelation, ServiceError>;

    async fn join_as_lecturer(
        &self,
        user_id: &str,
        workspace_id: &str,
    ) -> Result<WorkspaceRelation, ServiceError>;
}
