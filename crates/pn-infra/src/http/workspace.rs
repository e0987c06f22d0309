//! Workspace service over `/workspaces`.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use pn_core::ports::{ServiceError, WorkspacePort};
use pn_core::workspace::{CreateWorkspaceRequest, CreateWorkspaceShape, JoinedWorkspace, Workspace};

use super::client::ApiClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrimaryBody<'a> {
    title: &'a str,
    description: &'a str,
    owner_id: &'a str,
    icon: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimpleBody<'a> {
    name: &'a str,
    description: &'a str,
    owner_id: &'a str,
}

pub struct HttpWorkspaceService {
    client: ApiClient,
}

impl HttpWorkspaceService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WorkspacePort for HttpWorkspaceService {
    async fn create_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<Workspace, ServiceError> {
        let url = self.client.endpoint(&["workspaces"]);
        let workspace: Workspace = match request.shape {
            CreateWorkspaceShape::Primary => {
                let body = PrimaryBody {
                    title: &request.title,
                    description: &request.description,
                    owner_id: &request.owner_id,
                    icon: &request.icon,
                };
                self.client.post(url, Some(&body)).await?
            }
            CreateWorkspaceShape::Simple => {
                let body = SimpleBody {
                    name: &request.title,
                    description: &request.description,
                    owner_id: &request.owner_id,
                };
                self.client.post(url, Some(&body)).await?
            }
        };
        info!(workspace_id = %workspace.id, shape = %request.shape, "workspace created");
        Ok(workspace)
    }

    async fn join_workspace(
        &self,
        workspace_id: &str,
        user_id: &str,
    ) -> Result<JoinedWorkspace, ServiceError> {
        let mut url = self.client.endpoint(&["workspaces", "join"]);
        url.query_pairs_mut()
            .append_pair("workspaceId", workspace_id)
            .append_pair("userId", user_id);
        self.client.post::<(), _>(url, None).await
    }
}
