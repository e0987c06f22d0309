//! User↔workspace relations over `/user/workspace/{userId}/{workspaceId}`.

use async_trait::async_trait;
use tracing::debug;

use pn_core::ports::{RelationPort, ServiceError};
use pn_core::workspace::WorkspaceRelation;

use super::client::ApiClient;

pub struct HttpRelationService {
    client: ApiClient,
}

impl HttpRelationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn relate(
        &self,
        user_id: &str,
        workspace_id: &str,
        suffix: &[&str],
    ) -> Result<WorkspaceRelation, ServiceError> {
        let mut segments = vec!["user", "workspace", user_id, workspace_id];
        segments.extend_from_slice(suffix);
        let url = self.client.endpoint(&segments);
        let relation: WorkspaceRelation = self.client.post::<(), _>(url, None).await?;
        debug!(relation_id = %relation.id, role = ?relation.role, "relation established");
        Ok(relation)
    }
}

#[async_trait]
impl RelationPort for HttpRelationService {
    async fn create_owner_relation(
        &self,
        user_id: &str,
        workspace_id: &str,
    ) -> Result<WorkspaceRelation, ServiceError> {
        self.relate(user_id, workspace_id, &[]).await
    }

    async fn join_as_student(
        &self,
        user_id: &str,
        workspace_id: &str,
    ) -> Result<WorkspaceRelation, ServiceError> {
        self.relate(user_id, workspace_id, &["join"]).await
    }

    async fn join_as_lecturer(
        &self,
        user_id: &str,
        workspace_id: &str,
    ) -> Result<WorkspaceRelation, ServiceError> {
        self.relate(user_id, workspace_id, &["lecturer", "join"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use pn_core::workspace::RelationRole;
    use std::time::Duration;

    fn service(server: &Server) -> HttpRelationService {
        let client = ApiClient::new(&format!("{}/api", server.url()), Duration::from_secs(5))
            .expect("client");
        HttpRelationService::new(client)
    }

    fn relation_body(role: &str) -> String {
        format!(r#"{{"id":"r-1","userId":"u-1","workspaceId":"w-1","role":"{role}"}}"#)
    }

    #[tokio::test]
    async fn owner_relation_accepts_bare_object() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/user/workspace/u-1/w-1")
            .with_status(200)
            .with_body(relation_body("Owner"))
            .create_async()
            .await;

        let relation = service(&server)
            .create_owner_relation("u-1", "w-1")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(relation.role, RelationRole::Owner);
    }

    #[tokio::test]
    async fn student_and_lecturer_routes_differ() {
        let mut server = Server::new_async().await;
        let student = server
            .mock("POST", "/api/user/workspace/u-1/w-1/join")
            .with_status(200)
            .with_body(format!(r#"{{"data":{}}}"#, relation_body("Member")))
            .create_async()
            .await;
        let lecturer = server
            .mock("POST", "/api/user/workspace/u-1/w-1/lecturer/join")
            .with_status(200)
            .with_body(relation_body("Lecturer"))
            .create_async()
            .await;

        let svc = service(&server);
        let as_student = svc.join_as_student("u-1", "w-1").await.unwrap();
        let as_lecturer = svc.join_as_lecturer("u-1", "w-1").await.unwrap();

        student.assert_async().await;
        lecturer.assert_async().await;
        assert_eq!(as_student.role, RelationRole::Member);
        assert_eq!(as_lecturer.role, RelationRole::Lecturer);
    }

    #[tokio::test]
    async fn owner_relation_failure_keeps_status() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/user/workspace/u-1/w-1")
            .with_status(500)
            .create_async()
            .await;

        let err = service(&server)
            .create_owner_relation("u-1", "w-1")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::rejected(500, "request failed with status 500")
        );
    }
}
