//! Step gating.
//!
//! Pure functions deriving the status of every email-flow step from the
//! session. Nothing here is stored; statuses are recomputed on every read.
//!
//! 步骤状态完全由会话字段推导，不做存储。

use serde::{Deserialize, Serialize};

use super::session::{EmailSubStep, SignupSession};
use super::validation::{is_password_confirmed, is_valid_email, is_valid_password};

/// Display status of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Locked,
    Accessible,
    Current,
    Completed,
}

/// Boolean condition over session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    MethodSelected,
    EmailValid,
    PasswordValid,
    PasswordConfirmed,
}

impl Prerequisite {
    pub fn is_met(self, session: &SignupSession) -> bool {
        match self {
            Prerequisite::MethodSelected => session.method.is_selected(),
            Prerequisite::EmailValid => is_valid_email(&session.email),
            Prerequisite::PasswordValid => is_valid_password(session.password.expose()),
            Prerequisite::PasswordConfirmed => {
                is_password_confirmed(&session.password, &session.confirm_password)
            }
        }
    }
}

/// One row of a step table.
#[derive(Debug, Clone, Copy)]
pub struct StepRule {
    pub label: &'static str,
    /// Checked in order; any unmet entry locks the step.
    pub prerequisites: &'static [Prerequisite],
    /// `None` for steps that are never shown as completed.
    pub completion: Option<Prerequisite>,
}

/// The email signup flow, in declaration order. Index `i` is `EmailSubStep` `i`.
pub const EMAIL_FLOW_STEPS: &[StepRule] = &[
    StepRule {
        label: "Method",
        prerequisites: &[],
        completion: Some(Prerequisite::MethodSelected),
    },
    StepRule {
        label: "Email",
        prerequisites: &[Prerequisite::MethodSelected],
        completion: Some(Prerequisite::EmailValid),
    },
    StepRule {
        label: "Password",
        prerequisites: &[Prerequisite::MethodSelected, Prerequisite::EmailValid],
        completion: Some(Prerequisite::PasswordValid),
    },
    StepRule {
        label: "Confirm",
        prerequisites: &[
            Prerequisite::MethodSelected,
            Prerequisite::EmailValid,
            Prerequisite::PasswordValid,
        ],
        completion: Some(Prerequisite::PasswordConfirmed),
    },
    StepRule {
        label: "Done",
        prerequisites: &[
            Prerequisite::MethodSelected,
            Prerequisite::EmailValid,
            Prerequisite::PasswordValid,
            Prerequisite::PasswordConfirmed,
        ],
        completion: None,
    },
];

/// A labelled status, what the navigation bar renders per step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub index: usize,
    pub label: &'static str,
    pub status: StepStatus,
}

/// Status of `step_index` against an arbitrary step table.
///
/// Out-of-range indices are `Locked`.
pub fn status_in(
    rules: &[StepRule],
    step_index: usize,
    session: &SignupSession,
    current_index: usize,
) -> StepStatus {
    let Some(rule) = rules.get(step_index) else {
        return StepStatus::Locked;
    };
    if rule.prerequisites.iter().any(|p| !p.is_met(session)) {
        return StepStatus::Locked;
    }
    if step_index == current_index {
        return StepStatus::Current;
    }
    match rule.completion {
        Some(done) if done.is_met(session) => StepStatus::Completed,
        _ => StepStatus::Accessible,
    }
}

/// Status of an email-flow step.
pub fn status_of(step_index: usize, session: &SignupSession, current_index: usize) -> StepStatus {
    status_in(EMAIL_FLOW_STEPS, step_index, session, current_index)
}

/// The only gate navigation consults. Independent of the current position.
pub fn can_access(step_index: usize, session: &SignupSession) -> bool {
    match EMAIL_FLOW_STEPS.get(step_index) {
        Some(rule) => rule.prerequisites.iter().all(|p| p.is_met(session)),
        None => false,
    }
}

/// How many email-flow steps are currently reachable.
pub fn accessible_count(session: &SignupSession) -> usize {
    (0..EMAIL_FLOW_STEPS.len())
        .filter(|&i| can_access(i, session))
        .count()
}

pub fn step_statuses(session: &SignupSession, current_index: usize) -> Vec<StepView> {
    EMAIL_FLOW_STEPS
        .iter()
        .enumerate()
        .map(|(index, rule)| StepView {
            index,
            label: rule.label,
            status: status_of(index, session, current_index),
        })
        .collect()
}

/// First index whose completion predicate is unmet, scanning in declaration
/// order and stopping at the first miss.
pub fn first_incomplete_in(rules: &[StepRule], session: &SignupSession) -> Option<usize> {
    rules.iter().position(|rule| match rule.completion {
        Some(done) => !done.is_met(session),
        None => false,
    })
}

/// Sub-step to show when the wizard (re-)enters the method step.
pub fn first_incomplete_sub_step(session: &SignupSession) -> EmailSubStep {
    first_incomplete_in(EMAIL_FLOW_STEPS, session)
        .and_then(EmailSubStep::from_index)
        .unwrap_or(EmailSubStep::Done)
}
