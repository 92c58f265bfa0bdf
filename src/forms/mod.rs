//! User input accepted by the dashboard before anything is sent to the backend.

use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod filters;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Please provide email and password.")]
    MissingCredentials,

    #[error("All fields are required")]
    MissingFields,

    #[error("Please ensure your password meets all requirements")]
    WeakPassword,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("invalid sort direction: {0}")]
    InvalidSortDirection(String),
}
