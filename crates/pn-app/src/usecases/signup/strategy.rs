//! Workspace-creation attempt strategies.
//!
//! Creation walks an ordered list of request shapes. Each attempt is
//! classified so the policy stays visible: a rejected shape moves on to the
//! next one, a transport failure stops immediately.

use pn_core::ports::ServiceError;
use pn_core::signup::WorkspaceDraft;
use pn_core::workspace::{CreateWorkspaceRequest, CreateWorkspaceShape};

/// Primary shape first, then the simple shape once.
pub const DEFAULT_CREATE_STRATEGIES: [CreateWorkspaceShape; 2] =
    [CreateWorkspaceShape::Primary, CreateWorkspaceShape::Simple];

#[derive(Debug, PartialEq, Eq)]
pub enum AttemptResult<T> {
    Success(T),
    /// Worth trying the next strategy.
    Retryable(ServiceError),
    /// Stop, no further strategy can help.
    Fatal(ServiceError),
}

impl<T> AttemptResult<T> {
    pub fn classify(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(value) => AttemptResult::Success(value),
            Err(err) if err.is_retryable() => AttemptResult::Retryable(err),
            Err(err) => AttemptResult::Fatal(err),
        }
    }
}

pub fn build_request(
    shape: CreateWorkspaceShape,
    draft: &WorkspaceDraft,
    owner_id: &str,
) -> CreateWorkspaceRequest {
    CreateWorkspaceRequest {
        shape,
        title: draft.title.clone(),
        description: draft.description.clone(),
        icon: draft.icon.clone(),
        owner_id: owner_id.to_string(),
    }
}
