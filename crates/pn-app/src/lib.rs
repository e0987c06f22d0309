//! PaperNest Application Orchestration Layer
//!
//! This crate contains the signup and session use cases.

pub mod usecases;

pub use usecases::auth::{GetCurrentUser, LoginUser, LogoutUser};
pub use usecases::signup::{SignupFlow, SubmissionOrchestrator};
