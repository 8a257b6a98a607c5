//! # Course Routes — Catalog Listing
//!
//! ## Endpoints
//!
//! - `GET /courses` — list the course catalog (bearer)

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::db;
use crate::error::AppError;
use crate::state::AppState;

/// Build the courses router.
pub fn router() -> Router<AppState> {
    Router::new().route("/courses", get(list_courses))
}

/// GET /courses — List all available courses.
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "Course catalog", body = Vec<db::courses::CourseRecord>),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "courses"
)]
pub(crate) async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<db::courses::CourseRecord>>, AppError> {
    let courses = db::courses::list(&state.pool)
        .await
        .map_err(|e| AppError::Internal(format!("course listing failed: {e}")))?;
    Ok(Json(courses))
}
