use thiserror::Error;

use super::{models::UserId, EmailError};

/// Input that cannot become a user record. Always correctable by the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} must be a string")]
    NotAString(&'static str),
    #[error("name must not be empty")]
    EmptyName,
    #[error("{0} must not contain control characters")]
    ControlCharacter(&'static str),
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),
}

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("email '{email}' is already in use")]
    Conflict { email: String },
    #[error("user {0} not found")]
    NotFound(UserId),
    #[error("storage failure: {0}")]
    Persistence(String),
}

impl UserError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
