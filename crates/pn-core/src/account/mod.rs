//! Account domain models.
//!
//! Users as the account service returns them, the requests sent to it, and the
//! signed-in identity record kept between launches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::security::SecretString;

/// Role chosen during signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Student,
    Lecturer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Lecturer => "Lecturer",
        }
    }

    /// Lecturers never create workspaces during signup, they join one.
    pub fn can_create_workspace(self) -> bool {
        matches!(self, Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user as returned by the account service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    /// Kept as the raw string the backend sent; older accounts carry roles
    /// outside [`Role`].
    pub role: String,
}

/// Account registration payload.
#[derive(Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    /// `None` for federated (Google) signups, which never collect a password.
    pub password: Option<SecretString>,
    pub role: Role,
}

/// Email/password login payload.
#[derive(Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

/// The "currently signed-in" record the host keeps between launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedInIdentity {
    pub user: User,
    pub signed_in_at: DateTime<Utc>,
}

impl SignedInIdentity {
    pub fn now(user: User) -> Self {
        Self {
            user,
            signed_in_at: Utc::now(),
        }
    }
}
