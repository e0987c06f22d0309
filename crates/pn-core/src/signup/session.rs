//! Signup session data.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::Role;
use crate::security::SecretString;

pub const DEFAULT_WORKSPACE_ICON: &str = "🚀";

/// Icons offered on the workspace step.
pub const WORKSPACE_ICONS: [&str; 10] = ["🚀", "💼", "🏢", "⚡", "🎯", "🔥", "💡", "🌟", "🎨", "🔧"];

/// Signup channel.
///
/// 注册方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignupMethod {
    /// Nothing chosen yet.
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "google")]
    Google,
}

impl SignupMethod {
    pub fn is_selected(self) -> bool {
        !matches!(self, SignupMethod::Unset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceMode {
    #[default]
    Create,
    Join,
}

/// Coarse wizard position.
///
/// 向导的大步骤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Method,
    Profile,
    Workspace,
}

impl WizardStep {
    pub fn index(self) -> usize {
        match self {
            WizardStep::Method => 0,
            WizardStep::Profile => 1,
            WizardStep::Workspace => 2,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Method => f.write_str("method"),
            WizardStep::Profile => f.write_str("profile"),
            WizardStep::Workspace => f.write_str("workspace"),
        }
    }
}

/// Fine-grained position inside the email branch of [`WizardStep::Method`].
///
/// 邮箱注册分支内的小步骤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum EmailSubStep {
    #[default]
    ChooseMethod,
    Email,
    Password,
    ConfirmPassword,
    /// Everything collected, ready to move on to the profile step.
    Done,
}

impl EmailSubStep {
    pub const ALL: [EmailSubStep; 5] = [
        EmailSubStep::ChooseMethod,
        EmailSubStep::Email,
        EmailSubStep::Password,
        EmailSubStep::ConfirmPassword,
        EmailSubStep::Done,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }
}

/// Everything the user has entered so far plus the wizard position.
///
/// Owned by [`WizardController`](super::WizardController); other components
/// only ever see `&SignupSession`.
#[derive(Debug)]
pub struct SignupSession {
    pub method: SignupMethod,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub role: Role,
    pub workspace_mode: WorkspaceMode,
    pub workspace_icon: String,
    pub workspace_name: String,
    pub workspace_description: String,
    pub workspace_id_to_join: String,
    pub current_step: WizardStep,
    /// Only meaningful while `current_step == WizardStep::Method`.
    pub email_sub_step: EmailSubStep,
}

impl Default for SignupSession {
    fn default() -> Self {
        Self {
            method: SignupMethod::Unset,
            email: String::new(),
            password: SecretString::empty(),
            confirm_password: SecretString::empty(),
            first_name: String::new(),
            last_name: String::new(),
            username: String::new(),
            role: Role::Student,
            workspace_mode: WorkspaceMode::Create,
            workspace_icon: DEFAULT_WORKSPACE_ICON.to_string(),
            workspace_name: String::new(),
            workspace_description: String::new(),
            workspace_id_to_join: String::new(),
            current_step: WizardStep::Method,
            email_sub_step: EmailSubStep::ChooseMethod,
        }
    }
}

impl SignupSession {
    /// Display name sent to the account service.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}
