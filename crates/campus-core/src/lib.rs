#![deny(missing_docs)]

//! # campus-core — Foundational Types for the Campus Enrollment Portal
//!
//! This crate defines the domain primitives the API service is built on.
//! It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, `chrono`, and `bcrypt` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** An [`EmailAddress`] or a
//!    [`PasswordHash`] is constructed through a validating constructor; a
//!    raw `String` never crosses a component boundary as one of these.
//!
//! 2. **Plaintext passwords never leave this crate un-hashed.** All hashing
//!    flows through [`PasswordHash`], which applies a salted bcrypt digest.
//!    `Debug` output of credential types is redacted.
//!
//! 3. **[`ValidationError`] hierarchy.** Structured errors with `thiserror`
//!    — no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod email;
pub mod error;
pub mod password;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use email::EmailAddress;
pub use error::{PasswordError, ValidationError};
pub use password::{password_policy, PasswordHash, MAX_PASSWORD_BYTES};
pub use temporal::parse_birth_date;
