//! Enrollment ledger persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `enrollments` table.
//! The `UNIQUE (student_id, course_id)` constraint is the source of truth
//! for the one-enrollment-per-course invariant; [`exists`] is only an
//! advisory pre-check for a friendlier error. Every write is a single
//! atomic statement, so a cancelled request never leaves partial state.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

/// A created enrollment, joined with its course for the response.
#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct EnrollmentRecord {
    /// Enrollment id.
    pub id: i64,
    /// Enrolled course id.
    pub course_id: i64,
    /// Enrolled course name.
    pub course_name: String,
    /// Date the enrollment was created.
    pub enrollment_date: NaiveDate,
}

/// A course a student is enrolled in, as listed on the profile.
#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct EnrolledCourse {
    /// Course name.
    pub course_name: String,
    /// Date the enrollment was created.
    pub enrollment_date: NaiveDate,
}

/// Confirmation data for a deleted enrollment.
#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct DeletedEnrollment {
    /// The course the enrollment referenced.
    pub course_id: i64,
    /// Date the enrollment had been created.
    pub enrollment_date: NaiveDate,
}

/// Advisory check: is the student already enrolled in the course?
///
/// Racy by nature — two concurrent enrollments can both see `false`. The
/// unique constraint on the insert is what actually upholds the invariant.
pub async fn exists(pool: &PgPool, student_id: i64, course_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
}

/// Insert an enrollment dated today and return the generated id.
///
/// Fails with a unique violation if the pair is already enrolled and a
/// foreign-key violation if the course does not exist.
pub async fn insert(pool: &PgPool, student_id: i64, course_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO enrollments (student_id, course_id, enrollment_date)
         VALUES ($1, $2, CURRENT_DATE)
         RETURNING id",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
}

/// Fetch a created enrollment joined with its course.
pub async fn get_detail(
    pool: &PgPool,
    enrollment_id: i64,
) -> Result<Option<EnrollmentRecord>, sqlx::Error> {
    sqlx::query_as::<_, EnrollmentRecord>(
        "SELECT e.id, e.course_id, c.name AS course_name, e.enrollment_date
         FROM enrollments e
         JOIN courses c ON e.course_id = c.id
         WHERE e.id = $1",
    )
    .bind(enrollment_id)
    .fetch_optional(pool)
    .await
}

/// List the courses a student is enrolled in, with enrollment dates.
pub async fn list_for_student(
    pool: &PgPool,
    student_id: i64,
) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledCourse>(
        "SELECT c.name AS course_name, e.enrollment_date
         FROM enrollments e
         JOIN courses c ON e.course_id = c.id
         WHERE e.student_id = $1
         ORDER BY e.id",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

/// Delete an enrollment, returning the deleted row's confirmation data.
///
/// A single atomic statement: `None` means there was nothing to delete.
pub async fn delete(
    pool: &PgPool,
    enrollment_id: i64,
) -> Result<Option<DeletedEnrollment>, sqlx::Error> {
    sqlx::query_as::<_, DeletedEnrollment>(
        "DELETE FROM enrollments WHERE id = $1 RETURNING course_id, enrollment_date",
    )
    .bind(enrollment_id)
    .fetch_optional(pool)
    .await
}
