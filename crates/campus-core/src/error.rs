//! # Error Hierarchy
//!
//! Structured error types for the portal's domain layer, built with
//! `thiserror`. Every variant carries enough context to produce a
//! client-facing message without further formatting at the call site.

use thiserror::Error;

/// Domain-primitive validation failure. Always client-caused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was missing or blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The supplied email address is not well-formed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A date field did not parse as `YYYY-MM-DD`.
    #[error("invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A date field lies in the future.
    #[error("{field} must not be in the future")]
    FutureDate {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The password exceeds the hash function's input limit.
    #[error("password must not exceed {max} bytes")]
    PasswordTooLong {
        /// Maximum accepted length in bytes.
        max: usize,
    },
}

/// Failure while hashing or verifying a password.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The plaintext violated the password policy before hashing.
    #[error(transparent)]
    Policy(#[from] ValidationError),

    /// The underlying hash computation failed (malformed stored hash,
    /// out-of-range cost). Not client-caused.
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}
