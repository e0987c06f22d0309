//! # pn-core
//!
//! Core domain models and business logic for PaperNest signup.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod account;
pub mod config;
pub mod ports;
pub mod security;
pub mod signup;
pub mod workspace;

// Re-export commonly used types at the crate root
pub use account::{Role, SignedInIdentity, User};
pub use config::AppConfig;
pub use security::SecretString;
pub use signup::{SignupSession, StepStatus, WizardController};
pub use workspace::{Workspace, WorkspaceRelation};
