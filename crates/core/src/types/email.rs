//! Email address type.
//!
//! Registered shoppers are keyed by email, and login compares addresses
//! exactly, so no case folding or trimming is applied here.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains spaces, tabs or line breaks.
    #[error("email cannot contain whitespace")]
    Whitespace,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
}

/// A shopper's email address.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - No whitespace
/// - Local part (before the first @) must not be empty
/// - Domain part (after the first @) must not be empty
///
/// ## Examples
///
/// ```
/// use eclat_core::Email;
///
/// assert!(Email::parse("ava@eclatessence.com").is_ok());
/// assert!(Email::parse("ava.b+gift@mail.co.in").is_ok());
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("ava at mail").is_err());
/// assert!(Email::parse("@mail.com").is_err());
/// assert!(Email::parse("ava@").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 254 characters,
    /// contains whitespace, has no @ symbol, or has an empty local part or
    /// domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("ava@eclatessence.com").is_ok());
        assert!(Email::parse("ava.b@eclatessence.com").is_ok());
        assert!(Email::parse("ava+gift@eclatessence.com").is_ok());
        assert!(Email::parse("ava@mail.eclatessence.co.in").is_ok());
        assert!(Email::parse("a@b").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@eclatessence.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(Email::parse(" ava@mail.com"), Err(EmailError::Whitespace));
        assert_eq!(Email::parse("ava@mail.com\n"), Err(EmailError::Whitespace));
    }

    #[test]
    fn test_parse_missing_at() {
        assert_eq!(Email::parse("ava.mail.com"), Err(EmailError::MissingAtSymbol));
    }

    #[test]
    fn test_parse_empty_parts() {
        assert_eq!(Email::parse("@mail.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("ava@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let lower = Email::parse("ava@mail.com").unwrap();
        let upper = Email::parse("Ava@mail.com").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let email = Email::parse("ava@mail.com").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"ava@mail.com\"");
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Email>("\"ava@mail.com\"").is_ok());
        assert!(serde_json::from_str::<Email>("\"\"").is_err());
        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    }
}
