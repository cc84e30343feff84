use std::fmt;
use std::ops::Deref;
use thiserror::Error;
use validator::ValidateEmail;

/// A validated, normalized email address.
///
/// Normalization trims surrounding whitespace and lowercases the whole
/// address, so two inputs that differ only in case or padding compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmailError {
    #[error("email must not be empty")]
    Empty,
    #[error("'{0}' is not a valid email: must contain exactly one '@'")]
    InvalidFormat(String),
    #[error("'{0}' is not a valid email: missing local part")]
    MissingLocalPart(String),
    #[error("'{0}' is not a valid email: invalid local part")]
    InvalidLocalPart(String),
    #[error("'{0}' is not a valid email: invalid domain part")]
    InvalidDomainPart(String),
    #[error("'{0}' is not a valid email: must not contain whitespace")]
    ContainsWhitespace(String),
    #[error("email must not contain control characters")]
    ControlCharacter,
}

impl Email {
    /// Trims and lowercases `raw`, then validates the result.
    pub fn normalize(raw: &str) -> Result<Self, EmailError> {
        Self::try_from(raw.trim().to_lowercase().as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Email {
    type Error = EmailError;

    /// Validates a string and converts it into an `Email`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(EmailError::Empty);
        }

        if value.chars().any(char::is_control) {
            return Err(EmailError::ControlCharacter);
        }

        if value.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace(value.to_string()));
        }

        let mut parts = value.split('@');
        let local_part = parts.next().unwrap_or_default();
        let domain_part = parts.next();
        let extra_part = parts.next();

        if extra_part.is_some() {
            return Err(EmailError::InvalidFormat(value.to_string()));
        }

        let Some(domain) = domain_part else {
            return Err(EmailError::InvalidFormat(value.to_string()));
        };

        if local_part.is_empty() {
            return Err(EmailError::MissingLocalPart(value.to_string()));
        }

        if !is_valid_domain(domain) {
            return Err(EmailError::InvalidDomainPart(value.to_string()));
        }

        // The domain already passed the stricter check above, so a rejection
        // here comes from the local part's character set or length.
        let email = value.to_string();
        if !email.validate_email() {
            return Err(EmailError::InvalidLocalPart(email));
        }

        Ok(Self(email))
    }
}

/// Dotted hostname: labels of `[a-z0-9-]` that neither start nor end with
/// `-`, ending in an alphabetic top-level label of at least two letters.
fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, _)) = labels.split_last() else {
        return false;
    };

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    });

    labels_ok && labels.len() > 1 && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_lowercase())
}

impl Deref for Email {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
