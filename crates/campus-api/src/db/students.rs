//! Student (credential store) persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `students` table.
//! Email uniqueness is enforced by the `UNIQUE` column; callers detect it
//! on the insert via [`crate::db::is_unique_violation`].

use chrono::NaiveDate;
use sqlx::PgPool;

/// Column values for a new student row. The password arrives here already
/// hashed — plaintext never reaches the persistence layer.
#[derive(Debug)]
pub struct NewStudent<'a> {
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Validated, unique email address.
    pub email: &'a str,
    /// Postal address.
    pub address: &'a str,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Salted bcrypt hash of the password.
    pub password_hash: &'a str,
}

/// Stored credentials for a login attempt.
#[derive(Debug)]
pub struct Credentials {
    /// The student's id, used as the token subject on success.
    pub student_id: i64,
    /// The stored bcrypt hash.
    pub password_hash: String,
}

/// Profile fields returned by `GET /students/me`.
#[derive(Debug, Clone)]
pub struct StudentProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Postal address.
    pub address: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
}

/// Insert a new student and return the generated id.
///
/// A duplicate email fails the insert with a unique violation — the row is
/// never partially written.
pub async fn insert(pool: &PgPool, student: &NewStudent<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO students (first_name, last_name, email, address, date_of_birth, password_hash)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(student.first_name)
    .bind(student.last_name)
    .bind(student.email)
    .bind(student.address)
    .bind(student.date_of_birth)
    .bind(student.password_hash)
    .fetch_one(pool)
    .await
}

/// Fetch the stored credentials for an email, if the email is registered.
pub async fn credentials_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Credentials>, sqlx::Error> {
    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, password_hash FROM students WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| Credentials {
        student_id: r.id,
        password_hash: r.password_hash,
    }))
}

/// Fetch a student's profile by id.
pub async fn get_profile(pool: &PgPool, id: i64) -> Result<Option<StudentProfile>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT first_name, last_name, address, date_of_birth FROM students WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| StudentProfile {
        first_name: r.first_name,
        last_name: r.last_name,
        address: r.address,
        date_of_birth: r.date_of_birth,
    }))
}

/// Record the most recently issued session token for a student.
///
/// Overwrites any previous value. Verification never reads this column —
/// it exists as the record of the current login, not as a revocation list.
pub async fn set_session_token(pool: &PgPool, id: i64, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE students SET session_token = $1 WHERE id = $2")
        .bind(token)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    password_hash: String,
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    first_name: String,
    last_name: String,
    address: String,
    date_of_birth: NaiveDate,
}
