//! # Email Addresses
//!
//! Validated [`EmailAddress`] newtype. Construction is the only place the
//! format is checked; everything downstream (storage, lookup, responses)
//! can rely on a well-formed value.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum accepted length of an email address, per RFC 5321's path limit.
pub const MAX_EMAIL_LEN: usize = 254;

/// A validated email address.
///
/// Serializes/deserializes as a plain string. Validated on construction via
/// [`EmailAddress::new`]: non-empty, within length limits, exactly the
/// `local@domain` shape with a dotted domain, no whitespace. The input is
/// trimmed but otherwise stored as supplied — the portal treats addresses
/// as case-sensitive, matching the storage layer's uniqueness semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a validated email address.
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField { field: "email" });
        }
        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::InvalidEmail(format!(
                "exceeds {MAX_EMAIL_LEN} characters"
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidEmail(
                "must not contain whitespace".to_string(),
            ));
        }
        let Some((local, domain)) = trimmed.rsplit_once('@') else {
            return Err(ValidationError::InvalidEmail("missing '@'".to_string()));
        };
        if local.is_empty() {
            return Err(ValidationError::InvalidEmail(
                "missing local part before '@'".to_string(),
            ));
        }
        if domain.is_empty() {
            return Err(ValidationError::InvalidEmail(
                "missing domain after '@'".to_string(),
            ));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::InvalidEmail(format!(
                "malformed domain {domain:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_ordinary_address() {
        let email = EmailAddress::new("a@x.com").unwrap();
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let email = EmailAddress::new("  a@x.com  ").unwrap();
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            EmailAddress::new("   "),
            Err(ValidationError::EmptyField { field: "email" })
        );
    }

    #[test]
    fn rejects_missing_at() {
        assert!(EmailAddress::new("a.x.com").is_err());
    }

    #[test]
    fn rejects_missing_local_part() {
        assert!(EmailAddress::new("@x.com").is_err());
    }

    #[test]
    fn rejects_missing_domain() {
        assert!(EmailAddress::new("a@").is_err());
    }

    #[test]
    fn rejects_undotted_domain() {
        assert!(EmailAddress::new("a@localhost").is_err());
    }

    #[test]
    fn rejects_dot_edged_domain() {
        assert!(EmailAddress::new("a@.x.com").is_err());
        assert!(EmailAddress::new("a@x.com.").is_err());
    }

    #[test]
    fn rejects_interior_whitespace() {
        assert!(EmailAddress::new("a b@x.com").is_err());
    }

    #[test]
    fn rejects_overlong() {
        let long = format!("{}@x.com", "a".repeat(MAX_EMAIL_LEN));
        assert!(EmailAddress::new(long).is_err());
    }

    #[test]
    fn serde_round_trip_is_transparent() {
        let email = EmailAddress::new("a@x.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"a@x.com\"");
        let back: EmailAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, email);
    }

    proptest! {
        #[test]
        fn rejects_anything_without_an_at(s in "[a-zA-Z0-9._-]{0,40}") {
            prop_assert!(EmailAddress::new(s).is_err());
        }

        #[test]
        fn accepts_simple_shapes(
            local in "[a-z0-9]{1,16}",
            domain in "[a-z0-9]{1,16}",
            tld in "[a-z]{2,6}",
        ) {
            let s = format!("{local}@{domain}.{tld}");
            prop_assert!(EmailAddress::new(s).is_ok());
        }
    }
}
