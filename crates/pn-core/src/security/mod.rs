//! Security primitives shared by the signup and login flows.

mod secret;

pub use secret::SecretString;
