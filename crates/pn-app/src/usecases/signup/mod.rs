//! Signup use cases.
//!
//! This module exposes the signup flow and the submission orchestrator.

mod context;
pub mod flow;
pub mod orchestrator;
pub mod strategy;

pub use context::SignupContext;
pub use flow::{SignupFlow, SignupFlowError, WizardSnapshot};
pub use orchestrator::{
    RelationOutcome, SubmissionDeps, SubmissionError, SubmissionOrchestrator, SubmissionOutcome,
    SubmissionWarning, WorkspaceMembership,
};
