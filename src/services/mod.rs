//! Workflows behind the dashboard screens.

use thiserror::Error;

use crate::fetch::FetchError;
use crate::forms::FormError;

pub mod alerts;
pub mod auth;
pub mod clients;
pub mod history;
pub mod resources;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("{0}")]
    TypeConstraint(String),

    #[error("No token received from server.")]
    MissingToken,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Message shown to the operator.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
