//! Business logic use cases
//! 业务用例
//!
//! SignupFlow → WizardController (pure, pn-core)
//!     ↓ validated submission
//! SubmissionOrchestrator → AccountPort / WorkspacePort / RelationPort

pub mod auth;
pub mod signup;
