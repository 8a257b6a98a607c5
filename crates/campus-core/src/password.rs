//! # Password Hashing
//!
//! Salted, deliberately slow password hashing via bcrypt. [`PasswordHash`]
//! is the only representation of a password that may be persisted;
//! plaintext exists only transiently as `&str` arguments here.

use crate::error::{PasswordError, ValidationError};

/// bcrypt truncates input beyond 72 bytes; longer passwords are rejected
/// outright instead of being silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// A well-formed bcrypt hash, used to equalize the amount of work done on
/// the unknown-email login path. Hash of an unrelated, irrelevant string.
const TIMING_DUMMY_HASH: &str = "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

/// Check the password policy without hashing.
///
/// Request validation calls this before the (expensive) hash so policy
/// violations come back as ordinary validation errors.
pub fn password_policy(plain: &str) -> Result<(), ValidationError> {
    if plain.is_empty() {
        return Err(ValidationError::EmptyField { field: "password" });
    }
    if plain.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::PasswordTooLong {
            max: MAX_PASSWORD_BYTES,
        });
    }
    Ok(())
}

/// A salted bcrypt password hash.
///
/// `Debug` output is redacted — hashes are not secrets in the way plaintext
/// is, but they have no business in logs either.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password with the default bcrypt cost.
    ///
    /// Applies [`password_policy`] first. CPU-heavy by design — callers in
    /// async contexts should run this on a blocking thread.
    pub fn generate(plain: &str) -> Result<Self, PasswordError> {
        Self::generate_with_cost(plain, bcrypt::DEFAULT_COST)
    }

    /// Hash with an explicit bcrypt cost. Tests use a reduced cost; the
    /// service always uses [`PasswordHash::generate`].
    pub fn generate_with_cost(plain: &str, cost: u32) -> Result<Self, PasswordError> {
        password_policy(plain)?;
        Ok(Self(bcrypt::hash(plain, cost)?))
    }

    /// Wrap a hash loaded from storage. No validation — the storage layer
    /// only ever holds values produced by [`PasswordHash::generate`].
    pub fn from_stored(hash: String) -> Self {
        Self(hash)
    }

    /// A well-formed hash matching no password anyone will present.
    ///
    /// The login path verifies against this when the email is unknown, so
    /// the unknown-email and wrong-password outcomes cost the same.
    pub fn dummy() -> Self {
        Self(TIMING_DUMMY_HASH.to_string())
    }

    /// Verify a plaintext password against this hash.
    ///
    /// CPU-heavy by design, like [`PasswordHash::generate`]. An `Err` means
    /// the stored hash is malformed, not that the password mismatched.
    pub fn verify(&self, plain: &str) -> Result<bool, PasswordError> {
        Ok(bcrypt::verify(plain, &self.0)?)
    }

    /// Return the hash string for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost — keeps the hashing tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn generate_and_verify_round_trip() {
        let hash = PasswordHash::generate_with_cost("hunter2!", TEST_COST).unwrap();
        assert!(hash.verify("hunter2!").unwrap());
        assert!(!hash.verify("hunter3!").unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = PasswordHash::generate_with_cost("same-password", TEST_COST).unwrap();
        let b = PasswordHash::generate_with_cost("same-password", TEST_COST).unwrap();
        assert_ne!(a.as_str(), b.as_str());
        assert!(a.verify("same-password").unwrap());
        assert!(b.verify("same-password").unwrap());
    }

    #[test]
    fn empty_password_rejected() {
        let err = PasswordHash::generate_with_cost("", TEST_COST).unwrap_err();
        assert!(matches!(
            err,
            PasswordError::Policy(ValidationError::EmptyField { field: "password" })
        ));
    }

    #[test]
    fn overlong_password_rejected() {
        let long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        let err = PasswordHash::generate_with_cost(&long, TEST_COST).unwrap_err();
        assert!(matches!(
            err,
            PasswordError::Policy(ValidationError::PasswordTooLong { .. })
        ));
    }

    #[test]
    fn limit_length_password_accepted() {
        let edge = "x".repeat(MAX_PASSWORD_BYTES);
        assert!(password_policy(&edge).is_ok());
    }

    #[test]
    fn dummy_hash_is_well_formed() {
        // Must parse as a bcrypt hash and reject an arbitrary password.
        assert!(!PasswordHash::dummy().verify("any-password-at-all").unwrap());
    }

    #[test]
    fn stored_round_trip_preserves_hash() {
        let hash = PasswordHash::generate_with_cost("pw", TEST_COST).unwrap();
        let reloaded = PasswordHash::from_stored(hash.as_str().to_string());
        assert!(reloaded.verify("pw").unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        let bad = PasswordHash::from_stored("not-a-bcrypt-hash".to_string());
        assert!(matches!(bad.verify("pw"), Err(PasswordError::Hash(_))));
    }

    #[test]
    fn debug_is_redacted() {
        let hash = PasswordHash::generate_with_cost("secret", TEST_COST).unwrap();
        let debug = format!("{hash:?}");
        assert!(!debug.contains("secret"));
        assert!(!debug.contains(hash.as_str()));
        assert!(debug.contains("REDACTED"));
    }
}
