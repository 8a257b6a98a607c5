//! # Database Persistence Layer
//!
//! PostgreSQL persistence via SQLx. The credential store (`students`) and
//! the enrollment ledger (`courses`, `enrollments`) live here; each table
//! gets a module of async functions over `&PgPool` returning
//! `Result<_, sqlx::Error>`. Handlers map those errors to API errors.
//!
//! ## Invariants enforced here
//!
//! - `students.email` is `UNIQUE` — a duplicate registration fails at the
//!   insert, never leaving a partial record.
//! - `enrollments (student_id, course_id)` is `UNIQUE` — the constraint,
//!   not any application-level pre-check, is the source of truth for the
//!   one-enrollment-per-course invariant under concurrent requests.
//!
//! ## Timeouts
//!
//! Every store operation is bounded: pool acquisition by `acquire_timeout`
//! and statement execution by a server-side `statement_timeout` installed
//! on each pooled connection. A timeout surfaces as an error (and a 500 to
//! the caller) — never an automatic retry.

pub mod courses;
pub mod enrollments;
pub mod students;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;

/// Initialize the database connection pool and run embedded migrations.
///
/// `DATABASE_URL` is required — the portal has no in-memory mode.
pub async fn init_pool() -> Result<PgPool, sqlx::Error> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                // Bound every statement server-side; a timeout surfaces as
                // an error response, the client owns any retry.
                conn.execute("SET statement_timeout = '5s'").await?;
                Ok(())
            })
        })
        .connect(&url)
        .await?;

    tracing::info!("connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(pool)
}

/// Whether the error is a storage-layer unique-constraint violation.
///
/// The duplicate-email and already-enrolled pre-checks are advisory only;
/// this is how the constraint's verdict is read off the insert itself.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Whether the error is a foreign-key violation (e.g. enrolling in a
/// course that does not exist).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
