//! PaperNest infrastructure adapters.
//!
//! HTTP implementations of the account, workspace and relation ports, the
//! file-backed signed-in identity store and the submission event channel.

pub mod events;
pub mod http;
pub mod identity_store;

pub use events::BroadcastSubmissionEvents;
pub use http::{ApiClient, HttpAccountService, HttpRelationService, HttpWorkspaceService};
pub use identity_store::FileIdentityRepository;
