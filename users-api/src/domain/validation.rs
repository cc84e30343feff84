//! Normalization and validation of incoming user data.
//!
//! Type and presence checks run first, so a missing field and a field of the
//! wrong type fail the same way, before any trimming or format check.

use super::{models::NewUser, Email, ValidationError};

/// A single field as it arrived from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField {
    Missing,
    NotAString,
    Text(String),
}

impl RawField {
    fn require_text(self, field: &'static str) -> Result<String, ValidationError> {
        match self {
            RawField::Missing => Err(ValidationError::MissingField(field)),
            RawField::NotAString => Err(ValidationError::NotAString(field)),
            RawField::Text(text) => Ok(text),
        }
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

/// Unvalidated `{name, email}` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCandidate {
    pub name: RawField,
    pub email: RawField,
}

impl UserCandidate {
    #[cfg(test)]
    pub fn new(name: impl Into<RawField>, email: impl Into<RawField>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Turns a candidate into a storable [`NewUser`].
///
/// The name is trimmed and must not end up empty or hold control characters
/// (NUL included). The email is trimmed, lowercased and checked against the
/// address format. Uniqueness is not checked here; storage owns that
/// constraint.
pub fn normalize_and_validate(candidate: UserCandidate) -> Result<NewUser, ValidationError> {
    let name = candidate.name.require_text("name")?;
    let email = candidate.email.require_text("email")?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter("name"));
    }

    let email = Email::normalize(&email)?;

    Ok(NewUser::new(name.to_string(), email))
}
