//! # HTTP Route Modules
//!
//! Thin handlers translating HTTP requests into credential store,
//! enrollment ledger, and token issuer operations.
//!
//! | Prefix             | Module          | Auth   |
//! |--------------------|-----------------|--------|
//! | `/students/*`      | [`students`]    | mixed  |
//! | `/courses`         | [`courses`]     | bearer |
//! | `/enrollments/*`   | [`enrollments`] | bearer |

pub mod courses;
pub mod enrollments;
pub mod students;
