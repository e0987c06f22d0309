//! Submission payload and submission state machine.
//!
//! Defines a pure state transition function for the final submit; the side
//! effects live in the application layer.

use serde::Serialize;

use crate::account::{RegisterRequest, Role};

/// Workspace fields for a workspace that will be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceDraft {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspacePlan {
    Create(WorkspaceDraft),
    Join { workspace_id: String },
}

impl WorkspacePlan {
    pub fn is_create(&self) -> bool {
        matches!(self, WorkspacePlan::Create(_))
    }
}

/// Everything the final submit needs, frozen once the wizard validated it.
#[derive(Debug)]
pub struct SignupSubmission {
    pub registration: RegisterRequest,
    pub role: Role,
    pub plan: WorkspacePlan,
}

/// Submission progress.
///
/// 提交流程状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmissionState {
    Idle,
    Registering,
    Creating,
    Joining,
    RelatingOwnership,
    Done,
    Failed { reason: String },
}

/// Facts reported by the orchestrator.
///
/// 编排器上报的事实。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    Start,
    Registered { creates_workspace: bool },
    WorkspaceCreated,
    WorkspaceJoined,
    /// The ownership relation step finished, whether or not it succeeded.
    RelationSettled,
    Failed { reason: String },
}

/// Pure submission state machine.
///
/// 纯状态机：不包含副作用。
pub struct SubmissionStateMachine;

impl SubmissionStateMachine {
    pub fn transition(state: SubmissionState, event: SubmissionEvent) -> SubmissionState {
        match (state, event) {
            (
                SubmissionState::Idle | SubmissionState::Done | SubmissionState::Failed { .. },
                SubmissionEvent::Start,
            ) => SubmissionState::Registering,
            (SubmissionState::Registering, SubmissionEvent::Registered { creates_workspace }) => {
                if creates_workspace {
                    SubmissionState::Creating
                } else {
                    SubmissionState::Joining
                }
            }
            (SubmissionState::Creating, SubmissionEvent::WorkspaceCreated) => {
                SubmissionState::RelatingOwnership
            }
            (SubmissionState::Joining, SubmissionEvent::WorkspaceJoined) => SubmissionState::Done,
            (SubmissionState::RelatingOwnership, SubmissionEvent::RelationSettled) => {
                SubmissionState::Done
            }
            (
                SubmissionState::Registering | SubmissionState::Creating | SubmissionState::Joining,
                SubmissionEvent::Failed { reason },
            ) => SubmissionState::Failed { reason },
            (state, _event) => state,
        }
    }
}
