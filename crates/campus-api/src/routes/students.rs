//! # Student Routes — Registration, Login, Profile
//!
//! ## Endpoints
//!
//! - `POST /students/register` — create a student account (public)
//! - `POST /students/login` — authenticate and issue a session token (public)
//! - `GET  /students/me` — profile + enrolled courses (bearer)

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use campus_core::{parse_birth_date, password_policy, EmailAddress, PasswordError, PasswordHash};

use crate::auth::AuthStudent;
use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to register a new student.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Given name.
    pub first: String,
    /// Family name.
    pub last: String,
    /// Postal address.
    pub address: String,
    /// Email address — must be unique across all students.
    pub email: String,
    /// Plaintext password; hashed before storage, never persisted.
    pub password: String,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("first", &self.first),
            ("last", &self.last),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} must not be empty"));
            }
        }
        // Email and dob are parsed into typed values in the handler; the
        // policy check here keeps the expensive hash off the error path.
        EmailAddress::new(&self.email).map_err(|e| e.to_string())?;
        parse_birth_date("dob", &self.dob).map_err(|e| e.to_string())?;
        password_policy(&self.password).map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Successful registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// The new student's id.
    pub user_id: i64,
    /// The registered email, as stored.
    pub email: String,
}

/// Request to log in.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Registered email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("email must not be empty".to_string());
        }
        if self.password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        Ok(())
    }
}

/// Successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed session token, valid for 72 hours.
    pub token: String,
}

/// Profile + enrolled courses for the authenticated student.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// Given name.
    pub first: String,
    /// Family name.
    pub last: String,
    /// Postal address.
    pub address: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Courses the student is currently enrolled in.
    pub courses: Vec<db::enrollments::EnrolledCourse>,
}

// ── Routers ─────────────────────────────────────────────────────────

/// Routes reachable without a session token.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/students/register", post(register))
        .route("/students/login", post(login))
}

/// Routes behind the bearer-token middleware.
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/students/me", get(me))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /students/register — Create a student account.
#[utoipa::path(
    post,
    path = "/students/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Student registered", body = RegisterResponse),
        (status = 400, description = "Validation failure or duplicate email", body = crate::error::ErrorBody),
    ),
    tag = "students"
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    let req = extract_validated_json(body)?;

    let email =
        EmailAddress::new(&req.email).map_err(|e| AppError::Validation(e.to_string()))?;
    let date_of_birth =
        parse_birth_date("dob", &req.dob).map_err(|e| AppError::Validation(e.to_string()))?;

    // bcrypt is deliberately slow — keep it off the async runtime.
    let password = req.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || PasswordHash::generate(&password))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| match e {
            PasswordError::Policy(v) => AppError::Validation(v.to_string()),
            PasswordError::Hash(h) => AppError::Internal(format!("password hashing failed: {h}")),
        })?;

    let new_student = db::students::NewStudent {
        first_name: req.first.trim(),
        last_name: req.last.trim(),
        email: email.as_str(),
        address: req.address.trim(),
        date_of_birth,
        password_hash: password_hash.as_str(),
    };

    let user_id = db::students::insert(&state.pool, &new_student)
        .await
        .map_err(|e| {
            if db::is_unique_violation(&e) {
                AppError::DuplicateEmail
            } else {
                AppError::Internal(format!("student insert failed: {e}"))
            }
        })?;

    tracing::info!(user_id, "student registered");
    Ok(Json(RegisterResponse {
        user_id,
        email: email.into_string(),
    }))
}

/// POST /students/login — Authenticate and issue a session token.
#[utoipa::path(
    post,
    path = "/students/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = crate::error::ErrorBody),
    ),
    tag = "students"
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let req = extract_validated_json(body)?;

    let credentials = db::students::credentials_by_email(&state.pool, req.email.trim())
        .await
        .map_err(|e| AppError::Internal(format!("credential lookup failed: {e}")))?;

    // Unknown email still pays for a bcrypt verification against a dummy
    // hash, so the two failure paths cost the same.
    let (student_id, stored_hash) = match credentials {
        Some(c) => (Some(c.student_id), PasswordHash::from_stored(c.password_hash)),
        None => (None, PasswordHash::dummy()),
    };

    let password = req.password;
    let verified = tokio::task::spawn_blocking(move || stored_hash.verify(&password))
        .await
        .map_err(|e| AppError::Internal(format!("verification task failed: {e}")))?
        .unwrap_or_else(|e| {
            // A malformed stored hash means data corruption; log it, but
            // the caller still sees the uniform credentials failure.
            tracing::error!(error = %e, "stored password hash failed to parse");
            false
        });

    let Some(student_id) = student_id.filter(|_| verified) else {
        return Err(AppError::InvalidCredentials);
    };

    let token = state
        .issuer
        .issue(student_id)
        .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))?;

    // Record the current token. Verification never reads this column, so
    // earlier unexpired tokens remain valid — documented behavior.
    let updated = db::students::set_session_token(&state.pool, student_id, &token)
        .await
        .map_err(|e| AppError::Internal(format!("session token update failed: {e}")))?;
    if !updated {
        tracing::warn!(student_id, "session token update matched no rows");
    }

    tracing::info!(student_id, "student logged in");
    Ok(Json(LoginResponse { token }))
}

/// GET /students/me — Profile and enrolled courses.
#[utoipa::path(
    get,
    path = "/students/me",
    responses(
        (status = 200, description = "Profile with enrollments", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 404, description = "Student no longer exists", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "students"
)]
pub(crate) async fn me(
    State(state): State<AppState>,
    AuthStudent(student_id): AuthStudent,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = db::students::get_profile(&state.pool, student_id)
        .await
        .map_err(|e| AppError::Internal(format!("profile lookup failed: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("student {student_id} not found")))?;

    let courses = db::enrollments::list_for_student(&state.pool, student_id)
        .await
        .map_err(|e| AppError::Internal(format!("enrollment lookup failed: {e}")))?;

    Ok(Json(ProfileResponse {
        first: profile.first_name,
        last: profile.last_name,
        address: profile.address,
        date_of_birth: profile.date_of_birth,
        courses,
    }))
}
