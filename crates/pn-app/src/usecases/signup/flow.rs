//! Signup flow use case.
//!
//! Binds UI commands to the wizard and hands the validated result to the
//! submission orchestrator. The wizard lock is released before any network
//! call.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use pn_core::account::Role;
use pn_core::signup::{
    EmailForm, EmailSubStep, ProfileForm, SignupMethod, StepView, SubmissionState,
    ValidationError, WizardStep, WorkspaceForm, WorkspaceMode,
};

use super::context::SignupContext;
use super::orchestrator::{SubmissionError, SubmissionOrchestrator, SubmissionOutcome};

#[derive(Debug, thiserror::Error)]
pub enum SignupFlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// What the signup page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub current_step: WizardStep,
    pub email_sub_step: EmailSubStep,
    pub method: SignupMethod,
    pub role: Role,
    pub workspace_mode: WorkspaceMode,
    pub steps: Vec<StepView>,
    pub submission_state: SubmissionState,
    pub submitting: bool,
    pub last_error: Option<String>,
}

pub struct SignupFlow {
    context: SignupContext,
    orchestrator: Arc<SubmissionOrchestrator>,
}

impl SignupFlow {
    pub fn new(orchestrator: Arc<SubmissionOrchestrator>) -> Self {
        Self::with_context(SignupContext::default(), orchestrator)
    }

    pub fn with_context(context: SignupContext, orchestrator: Arc<SubmissionOrchestrator>) -> Self {
        Self {
            context,
            orchestrator,
        }
    }

    pub async fn select_method(&self, method: SignupMethod) -> Result<(), SignupFlowError> {
        self.context
            .with_wizard(|wizard| wizard.select_method(method))
            .await?;
        Ok(())
    }

    pub async fn advance(&self, form: &EmailForm) -> Result<(), SignupFlowError> {
        self.context
            .with_wizard(|wizard| wizard.advance_email_sub_step(form))
            .await?;
        Ok(())
    }

    pub async fn retreat(&self) {
        self.context
            .with_wizard(|wizard| wizard.retreat_email_sub_step())
            .await;
    }

    pub async fn submit_profile(&self, form: &ProfileForm) -> Result<(), SignupFlowError> {
        self.context
            .with_wizard(|wizard| wizard.submit_profile(form))
            .await?;
        Ok(())
    }

    pub async fn go_back(&self) -> bool {
        self.context.with_wizard(|wizard| wizard.go_back()).await
    }

    pub async fn jump_to_step(&self, step_index: usize) -> bool {
        self.context
            .with_wizard(|wizard| wizard.jump_to_step(step_index))
            .await
    }

    pub async fn set_role(&self, role: Role) {
        self.context.with_wizard(|wizard| wizard.set_role(role)).await;
    }

    pub async fn set_workspace_mode(&self, mode: WorkspaceMode) -> Result<(), SignupFlowError> {
        self.context
            .with_wizard(|wizard| wizard.set_workspace_mode(mode))
            .await?;
        Ok(())
    }

    /// Validate the workspace step and run the submission.
    ///
    /// On success the session is discarded. On a fatal failure the session is
    /// kept as-is and the message is recorded for the banner.
    pub async fn submit(&self, form: &WorkspaceForm) -> Result<SubmissionOutcome, SignupFlowError> {
        let submission = self
            .context
            .with_wizard(|wizard| wizard.prepare_submission(form))
            .await?;

        self.context.set_last_error(None).await;
        match self.orchestrator.submit(&submission).await {
            Ok(outcome) => {
                self.context.with_wizard(|wizard| wizard.reset()).await;
                info!(user_id = %outcome.user.id, "signup finished, session discarded");
                Ok(outcome)
            }
            Err(SubmissionError::AlreadyInFlight) => Err(SubmissionError::AlreadyInFlight.into()),
            Err(err) => {
                warn!(error = %err, "signup submission failed, session retained");
                self.context.set_last_error(Some(err.to_string())).await;
                Err(err.into())
            }
        }
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        let (current_step, email_sub_step, method, role, workspace_mode, steps) = self
            .context
            .with_wizard(|wizard| {
                let session = wizard.session();
                (
                    session.current_step,
                    session.email_sub_step,
                    session.method,
                    session.role,
                    session.workspace_mode,
                    wizard.step_statuses(),
                )
            })
            .await;

        WizardSnapshot {
            current_step,
            email_sub_step,
            method,
            role,
            workspace_mode,
            steps,
            submission_state: self.orchestrator.state().await,
            submitting: self.orchestrator.is_in_flight(),
            last_error: self.context.last_error().await,
        }
    }
}
