//! Port interfaces for the application layer
//!
//! Ports define the contract between the signup use cases and the
//! infrastructure that talks to the PaperNest backend. Use cases depend on
//! these traits only; `pn-infra` provides the HTTP and file implementations.

pub mod account;
pub mod errors;
pub mod identity_store;
pub mod relation;
pub mod submission_event;
pub mod workspace;

pub use account::AccountPort;
pub use errors::ServiceError;
pub use identity_store::IdentityStorePort;
pub use relation::RelationPort;
pub use submission_event::SubmissionEventPort;
pub use workspace::WorkspacePort;
