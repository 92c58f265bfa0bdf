use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::forms::FormError;

/// Minimum accepted password length at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
/// Credentials typed on the login screen.
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login credentials that passed client-side checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        let email = form.email.trim();
        if email.is_empty() || form.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(Self {
            email: email.to_string(),
            password: form.password,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Sign-up form.
pub struct SignupForm {
    /// Display name, sent as `username`.
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

/// Sign-up data that passed client-side checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<SignupForm> for SignupPayload {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        let form = SignupForm {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password,
        };
        if form.name.is_empty() || form.email.is_empty() || form.password.is_empty() {
            return Err(FormError::MissingFields);
        }

        if let Err(errors) = form.validate() {
            let fields = errors.field_errors();
            if fields.contains_key("password") {
                return Err(FormError::WeakPassword);
            }
            if fields.contains_key("email") {
                return Err(FormError::InvalidEmail);
            }
            return Err(FormError::Validation(errors));
        }

        Ok(Self {
            username: form.name,
            email: form.email,
            password: form.password,
        })
    }
}

/// Individual password rules, as shown next to the sign-up field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub has_length: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        Self {
            has_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_upper: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lower: password.chars().any(|c| c.is_ascii_lowercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    pub fn is_strong(&self) -> bool {
        self.has_length && self.has_upper && self.has_lower && self.has_digit
    }
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if PasswordStrength::of(password).is_strong() {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength"))
    }
}
