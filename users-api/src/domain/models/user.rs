use time::OffsetDateTime;

use super::UserId;
use crate::domain::Email;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A normalized, validated user ready to be written to storage.
///
/// Only [`crate::domain::normalize_and_validate`] produces one, so holding a
/// `NewUser` means the name is trimmed and non-empty and the email is
/// trimmed, lowercased and well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: Email,
}

impl NewUser {
    pub(crate) fn new(name: String, email: Email) -> Self {
        Self { name, email }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}
