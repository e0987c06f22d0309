//! Field predicates and validators.
//!
//! The step gate and the wizard controller share these, so a field the
//! navigation bar shows as completed is exactly a field the form accepts.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ValidationError;
use crate::security::SecretString;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 3;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Non-empty confirmation equal to the password.
pub fn is_password_confirmed(password: &SecretString, confirm: &SecretString) -> bool {
    !confirm.is_empty() && password.matches(confirm)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_password(password: &SecretString) -> Result<(), ValidationError> {
    if is_valid_password(password.expose()) {
        Ok(())
    } else {
        Err(ValidationError::password_too_short())
    }
}

/// Password first, then presence of the confirmation, then equality.
pub fn validate_confirmation(
    password: &SecretString,
    confirm: &SecretString,
) -> Result<(), ValidationError> {
    validate_password(password)?;
    if confirm.is_empty() {
        return Err(ValidationError::ConfirmPasswordRequired);
    }
    if !password.matches(confirm) {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::username_too_short());
    }
    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::UsernameInvalid);
    }
    Ok(())
}

pub(crate) fn require(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}
