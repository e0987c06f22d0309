//! Sign-in session use cases.

pub mod login;
pub mod session;

pub use login::{LoginError, LoginUser};
pub use session::{GetCurrentUser, LogoutUser};
