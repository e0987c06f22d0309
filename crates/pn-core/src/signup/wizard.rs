//! Signup wizard controller.
//!
//! The single mutator of a [`SignupSession`]. Every transition validates
//! against the same predicates the step gate uses and commits nothing when
//! validation fails.
//!
//! 向导控制器：会话的唯一写入者，校验失败时不修改任何状态。

use super::error::ValidationError;
use super::session::{EmailSubStep, SignupMethod, SignupSession, WizardStep, WorkspaceMode};
use super::step_gate::{self, StepView};
use super::submission::{SignupSubmission, WorkspaceDraft, WorkspacePlan};
use super::validation::{
    require, validate_confirmation, validate_email, validate_password, validate_username,
};
use crate::account::{RegisterRequest, Role};
use crate::security::SecretString;

/// Values currently typed into the email/password form.
#[derive(Debug, Default)]
pub struct EmailForm {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceForm {
    pub icon: String,
    pub name: String,
    pub description: String,
    pub workspace_id_to_join: String,
}

#[derive(Debug, Default)]
pub struct WizardController {
    session: SignupSession,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing session, e.g. one restored by the host.
    ///
    /// The sub-step is derived again rather than trusted.
    pub fn resume(mut session: SignupSession) -> Self {
        if session.current_step == WizardStep::Method {
            session.email_sub_step = step_gate::first_incomplete_sub_step(&session);
        }
        Self { session }
    }

    pub fn session(&self) -> &SignupSession {
        &self.session
    }

    pub fn current_step(&self) -> WizardStep {
        self.session.current_step
    }

    pub fn email_sub_step(&self) -> EmailSubStep {
        self.session.email_sub_step
    }

    /// Position the step gate treats as current. Past the method step the
    /// email flow is finished, so `Done` is current.
    pub fn gate_position(&self) -> EmailSubStep {
        match self.session.current_step {
            WizardStep::Method => self.session.email_sub_step,
            WizardStep::Profile | WizardStep::Workspace => EmailSubStep::Done,
        }
    }

    pub fn step_statuses(&self) -> Vec<StepView> {
        step_gate::step_statuses(&self.session, self.gate_position().index())
    }

    /// Discard everything collected so far.
    pub fn reset(&mut self) {
        self.session = SignupSession::default();
    }

    pub fn select_method(&mut self, method: SignupMethod) -> Result<(), ValidationError> {
        self.expect_step(WizardStep::Method)?;
        match method {
            SignupMethod::Unset => return Err(ValidationError::MethodRequired),
            SignupMethod::Google => {
                self.session.method = method;
                self.enter_step(WizardStep::Profile);
            }
            SignupMethod::Email => {
                self.session.method = method;
                self.session.email_sub_step = EmailSubStep::Email;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?method, step = %self.session.current_step, "signup method selected");
        Ok(())
    }

    /// Validate and commit the field(s) owned by the current sub-step, then move on.
    pub fn advance_email_sub_step(&mut self, form: &EmailForm) -> Result<(), ValidationError> {
        self.expect_step(WizardStep::Method)?;
        match self.session.email_sub_step {
            EmailSubStep::ChooseMethod => return Err(ValidationError::MethodRequired),
            EmailSubStep::Email => {
                validate_email(&form.email)?;
                self.session.email = form.email.clone();
                self.session.email_sub_step = EmailSubStep::Password;
            }
            EmailSubStep::Password => {
                validate_password(&form.password)?;
                self.session.password = form.password.duplicate();
                self.session.email_sub_step = EmailSubStep::ConfirmPassword;
            }
            EmailSubStep::ConfirmPassword => {
                validate_confirmation(&form.password, &form.confirm_password)?;
                self.session.password = form.password.duplicate();
                self.session.confirm_password = form.confirm_password.duplicate();
                self.enter_step(WizardStep::Profile);
            }
            EmailSubStep::Done => {
                if !step_gate::can_access(EmailSubStep::Done.index(), &self.session) {
                    let pending = step_gate::first_incomplete_sub_step(&self.session);
                    return Err(missing_field_error(pending));
                }
                self.enter_step(WizardStep::Profile);
            }
        }
        Ok(())
    }

    /// Moving backward is always allowed and never validates.
    pub fn retreat_email_sub_step(&mut self) {
        if self.session.current_step != WizardStep::Method {
            return;
        }
        if let Some(previous) = self.session.email_sub_step.previous() {
            self.session.email_sub_step = previous;
        }
    }

    pub fn submit_profile(&mut self, form: &ProfileForm) -> Result<(), ValidationError> {
        self.expect_step(WizardStep::Profile)?;
        require(&form.first_name, ValidationError::FirstNameRequired)?;
        require(&form.last_name, ValidationError::LastNameRequired)?;
        validate_username(&form.username)?;

        self.session.first_name = form.first_name.clone();
        self.session.last_name = form.last_name.clone();
        self.session.username = form.username.clone();
        self.enter_step(WizardStep::Workspace);
        Ok(())
    }

    /// Step back one coarse step. Collected data is kept.
    ///
    /// Returns `false` when already on the first step.
    pub fn go_back(&mut self) -> bool {
        match self.session.current_step {
            WizardStep::Method => false,
            WizardStep::Profile => {
                self.enter_step(WizardStep::Method);
                true
            }
            WizardStep::Workspace => {
                self.enter_step(WizardStep::Profile);
                true
            }
        }
    }

    /// Navigation-bar jump. A no-op returning `false` unless the step is accessible.
    pub fn jump_to_step(&mut self, step_index: usize) -> bool {
        if !step_gate::can_access(step_index, &self.session) {
            return false;
        }
        let Some(target) = EmailSubStep::from_index(step_index) else {
            return false;
        };
        self.session.current_step = WizardStep::Method;
        self.session.email_sub_step = target;
        true
    }

    /// Choosing `Lecturer` forces join mode.
    pub fn set_role(&mut self, role: Role) {
        self.session.role = role;
        if !role.can_create_workspace() {
            self.session.workspace_mode = WorkspaceMode::Join;
        }
    }

    pub fn set_workspace_mode(&mut self, mode: WorkspaceMode) -> Result<(), ValidationError> {
        if mode == WorkspaceMode::Create && !self.session.role.can_create_workspace() {
            return Err(ValidationError::LecturerMustJoin);
        }
        self.session.workspace_mode = mode;
        Ok(())
    }

    /// Validate the workspace step and freeze everything into a submission.
    ///
    /// Nothing reaches the network unless this succeeds.
    pub fn prepare_submission(
        &mut self,
        form: &WorkspaceForm,
    ) -> Result<SignupSubmission, ValidationError> {
        self.expect_step(WizardStep::Workspace)?;

        let mode = if self.session.role.can_create_workspace() {
            self.session.workspace_mode
        } else {
            WorkspaceMode::Join
        };

        match mode {
            WorkspaceMode::Create => {
                require(&form.icon, ValidationError::WorkspaceIconRequired)?;
                require(&form.name, ValidationError::WorkspaceNameRequired)?;
                require(&form.description, ValidationError::WorkspaceDescriptionRequired)?;
                self.session.workspace_icon = form.icon.clone();
                self.session.workspace_name = form.name.clone();
                self.session.workspace_description = form.description.clone();
            }
            WorkspaceMode::Join => {
                let id = form.workspace_id_to_join.trim();
                require(id, ValidationError::WorkspaceIdRequired)?;
                self.session.workspace_id_to_join = id.to_string();
            }
        }
        self.session.workspace_mode = mode;

        Ok(self.build_submission())
    }

    fn build_submission(&self) -> SignupSubmission {
        let s = &self.session;
        let password = match s.method {
            SignupMethod::Email => Some(s.password.duplicate()),
            SignupMethod::Google | SignupMethod::Unset => None,
        };
        let plan = match s.workspace_mode {
            WorkspaceMode::Create => WorkspacePlan::Create(WorkspaceDraft {
                title: s.workspace_name.clone(),
                description: s.workspace_description.clone(),
                icon: s.workspace_icon.clone(),
            }),
            WorkspaceMode::Join => WorkspacePlan::Join {
                workspace_id: s.workspace_id_to_join.clone(),
            },
        };
        SignupSubmission {
            registration: RegisterRequest {
                name: s.full_name(),
                email: s.email.clone(),
                username: s.username.clone(),
                password,
                role: s.role,
            },
            role: s.role,
            plan,
        }
    }

    fn enter_step(&mut self, step: WizardStep) {
        self.session.current_step = step;
        if step == WizardStep::Method {
            self.session.email_sub_step = step_gate::first_incomplete_sub_step(&self.session);
        }
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), ValidationError> {
        if self.session.current_step == expected {
            Ok(())
        } else {
            Err(ValidationError::WrongStep {
                expected,
                actual: self.session.current_step,
            })
        }
    }
}

fn missing_field_error(pending: EmailSubStep) -> ValidationError {
    match pending {
        EmailSubStep::ChooseMethod => ValidationError::MethodRequired,
        EmailSubStep::Email => ValidationError::InvalidEmail,
        EmailSubStep::Password => ValidationError::password_too_short(),
        EmailSubStep::ConfirmPassword | EmailSubStep::Done => ValidationError::PasswordMismatch,
    }
}
