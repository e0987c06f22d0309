use serde::{Deserialize, Serialize};

use super::session::WizardStep;
use super::validation::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignupField {
    Method,
    Email,
    Password,
    ConfirmPassword,
    FirstName,
    LastName,
    Username,
    WorkspaceMode,
    WorkspaceIcon,
    WorkspaceName,
    WorkspaceDescription,
    WorkspaceIdToJoin,
}

/// Local validation failure. Never sent to the network.
///
/// 本地校验错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Please select a signup method")]
    MethodRequired,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {min_len} characters long")]
    PasswordTooShort { min_len: usize },
    #[error("Please confirm your password")]
    ConfirmPasswordRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Username must be at least {min_len} characters")]
    UsernameTooShort { min_len: usize },
    #[error("Username can only contain letters, numbers, and underscores")]
    UsernameInvalid,
    #[error("Please select an icon")]
    WorkspaceIconRequired,
    #[error("Workspace name is required")]
    WorkspaceNameRequired,
    #[error("Workspace description is required")]
    WorkspaceDescriptionRequired,
    #[error("Please enter the ID of the workspace to join")]
    WorkspaceIdRequired,
    #[error("Lecturers can only join an existing workspace")]
    LecturerMustJoin,
    #[error("this action belongs to the {expected} step, the wizard is on the {actual} step")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },
}

impl ValidationError {
    pub fn password_too_short() -> Self {
        ValidationError::PasswordTooShort {
            min_len: MIN_PASSWORD_LEN,
        }
    }

    pub fn username_too_short() -> Self {
        ValidationError::UsernameTooShort {
            min_len: MIN_USERNAME_LEN,
        }
    }

    /// Field the message should be rendered next to, if any.
    pub fn field(&self) -> Option<SignupField> {
        match self {
            ValidationError::MethodRequired => Some(SignupField::Method),
            ValidationError::InvalidEmail => Some(SignupField::Email),
            ValidationError::PasswordTooShort { .. } => Some(SignupField::Password),
            ValidationError::ConfirmPasswordRequired | ValidationError::PasswordMismatch => {
                Some(SignupField::ConfirmPassword)
            }
            ValidationError::FirstNameRequired => Some(SignupField::FirstName),
            ValidationError::LastNameRequired => Some(SignupField::LastName),
            ValidationError::UsernameTooShort { .. } | ValidationError::UsernameInvalid => {
                Some(SignupField::Username)
            }
            ValidationError::WorkspaceIconRequired => Some(SignupField::WorkspaceIcon),
            ValidationError::WorkspaceNameRequired => Some(SignupField::WorkspaceName),
            ValidationError::WorkspaceDescriptionRequired => {
                Some(SignupField::WorkspaceDescription)
            }
            ValidationError::WorkspaceIdRequired => Some(SignupField::WorkspaceIdToJoin),
            ValidationError::LecturerMustJoin => Some(SignupField::WorkspaceMode),
            ValidationError::WrongStep { .. } => None,
        }
    }
}
