//! # Enrollment Routes — Enroll & Withdraw
//!
//! ## Endpoints
//!
//! - `POST   /enrollments` — enroll the authenticated student (bearer)
//! - `DELETE /enrollments/:id` — delete an enrollment (bearer)
//!
//! The enroll flow is pre-check → insert: the `SELECT EXISTS` pre-check
//! only buys a friendlier error, while the `UNIQUE (student_id, course_id)`
//! constraint remains the source of truth when concurrent requests race on
//! the same pair.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::AuthStudent;
use crate::db;
use crate::db::enrollments::{DeletedEnrollment, EnrollmentRecord};
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request DTOs ────────────────────────────────────────────────────

/// Request to enroll the authenticated student in a course.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    /// Id of the course to enroll in.
    pub course_id: i64,
}

impl Validate for EnrollRequest {
    fn validate(&self) -> Result<(), String> {
        if self.course_id <= 0 {
            return Err("course_id must be a positive id".to_string());
        }
        Ok(())
    }
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the enrollments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(enroll))
        .route("/enrollments/:id", delete(delete_enrollment))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /enrollments — Enroll the authenticated student in a course.
#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Enrollment created", body = EnrollmentRecord),
        (status = 400, description = "Already enrolled or unknown course", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "enrollments"
)]
pub(crate) async fn enroll(
    State(state): State<AppState>,
    AuthStudent(student_id): AuthStudent,
    body: Result<Json<EnrollRequest>, JsonRejection>,
) -> Result<Json<EnrollmentRecord>, AppError> {
    let req = extract_validated_json(body)?;

    // Advisory pre-check for the friendly error; the constraint decides.
    let already = db::enrollments::exists(&state.pool, student_id, req.course_id)
        .await
        .map_err(|e| AppError::Internal(format!("enrollment check failed: {e}")))?;
    if already {
        return Err(AppError::AlreadyEnrolled);
    }

    let enrollment_id = db::enrollments::insert(&state.pool, student_id, req.course_id)
        .await
        .map_err(|e| {
            if db::is_unique_violation(&e) {
                // Lost a race with a concurrent enrollment of the same pair.
                AppError::AlreadyEnrolled
            } else if db::is_foreign_key_violation(&e) {
                AppError::Validation(format!("course {} does not exist", req.course_id))
            } else {
                AppError::Internal(format!("enrollment insert failed: {e}"))
            }
        })?;

    let record = db::enrollments::get_detail(&state.pool, enrollment_id)
        .await
        .map_err(|e| AppError::Internal(format!("enrollment detail lookup failed: {e}")))?
        .ok_or_else(|| {
            AppError::Internal(format!("enrollment {enrollment_id} vanished after insert"))
        })?;

    tracing::info!(student_id, course_id = req.course_id, enrollment_id, "student enrolled");
    Ok(Json(record))
}

/// DELETE /enrollments/:id — Delete an enrollment.
#[utoipa::path(
    delete,
    path = "/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment id")),
    responses(
        (status = 200, description = "Enrollment deleted", body = DeletedEnrollment),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 404, description = "Enrollment not found", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "enrollments"
)]
pub(crate) async fn delete_enrollment(
    State(state): State<AppState>,
    Path(enrollment_id): Path<i64>,
) -> Result<Json<DeletedEnrollment>, AppError> {
    // Single atomic delete-returning: the absent row IS the not-found check.
    let deleted = db::enrollments::delete(&state.pool, enrollment_id)
        .await
        .map_err(|e| AppError::Internal(format!("enrollment delete failed: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("enrollment {enrollment_id} not found")))?;

    tracing::info!(enrollment_id, course_id = deleted.course_id, "enrollment deleted");
    Ok(Json(deleted))
}
