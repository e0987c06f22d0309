//! Workspace domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    /// Older backend builds answer with `name` instead of `title`.
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationRole {
    Owner,
    Member,
    Lecturer,
}

/// A user↔workspace relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRelation {
    pub id: String,
    pub user_id: String,
    pub workspace_id: String,
    pub role: RelationRole,
}

/// Result of joining a workspace by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedWorkspace {
    pub workspace: Workspace,
    #[serde(alias = "userWorkspace")]
    pub relation: WorkspaceRelation,
}

/// Payload shape used for a workspace-creation request.
///
/// The backend has accepted both shapes at different points in time, so
/// creation tries them in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateWorkspaceShape {
    /// `{ title, description, ownerId, icon }`
    Primary,
    /// `{ name, description, ownerId }`
    Simple,
}

impl fmt::Display for CreateWorkspaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateWorkspaceShape::Primary => f.write_str("primary"),
            CreateWorkspaceShape::Simple => f.write_str("simple"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkspaceRequest {
    pub shape: CreateWorkspaceShape,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub owner_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_accepts_name_alias() {
        let ws: Workspace =
            serde_json::from_str(r#"{"id":"w1","name":"Thesis","description":"notes"}"#).unwrap();
        assert_eq!(ws.title, "Thesis");
        assert_eq!(ws.created_at, None);
    }

    #[test]
    fn joined_workspace_accepts_user_workspace_key() {
        let joined: JoinedWorkspace = serde_json::from_str(
            r#"{
                "workspace": {"id":"w1","title":"Lab"},
                "userWorkspace": {"id":"r1","userId":"u1","workspaceId":"w1","role":"Member"}
            }"#,
        )
        .unwrap();
        assert_eq!(joined.relation.role, RelationRole::Member);
        assert_eq!(joined.relation.user_id, "u1");
    }
}
