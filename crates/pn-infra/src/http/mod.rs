//! REST adapters for the PaperNest backend.
//!
//! Every route answers either with the `{ message, data }` envelope or with
//! the bare object; [`ApiClient`] accepts both.

mod client;
pub mod account;
pub mod relation;
pub mod workspace;

pub use account::HttpAccountService;
pub use client::ApiClient;
pub use relation::HttpRelationService;
pub use workspace::HttpWorkspaceService;
