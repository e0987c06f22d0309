//! Signup domain module.
//!
//! Session data, step gating, the wizard controller and the submission state
//! machine. Everything here is synchronous and free of I/O.

pub mod error;
pub mod session;
pub mod step_gate;
pub mod submission;
pub mod validation;
pub mod wizard;

pub use error::{SignupField, ValidationError};
pub use session::{
    EmailSubStep, SignupMethod, SignupSession, WizardStep, WorkspaceMode,
    DEFAULT_WORKSPACE_ICON, WORKSPACE_ICONS,
};
pub use step_gate::{StepStatus, StepView};
pub use submission::{
    SignupSubmission, SubmissionEvent, SubmissionState, SubmissionStateMachine, WorkspaceDraft,
    WorkspacePlan,
};
pub use wizard::{EmailForm, ProfileForm, WizardController, WorkspaceForm};
