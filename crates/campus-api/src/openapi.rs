//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Enrollment Portal API",
        version = "0.1.0",
        description = "Student registration and login, session tokens, course catalog, and course enrollments.",
        license(name = "MIT")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Students
        crate::routes::students::register,
        crate::routes::students::login,
        crate::routes::students::me,
        // Courses
        crate::routes::courses::list_courses,
        // Enrollments
        crate::routes::enrollments::enroll,
        crate::routes::enrollments::delete_enrollment,
    ),
    components(schemas(
        // Record types
        crate::db::courses::CourseRecord,
        crate::db::enrollments::EnrollmentRecord,
        crate::db::enrollments::EnrolledCourse,
        crate::db::enrollments::DeletedEnrollment,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Student DTOs
        crate::routes::students::RegisterRequest,
        crate::routes::students::RegisterResponse,
        crate::routes::students::LoginRequest,
        crate::routes::students::LoginResponse,
        crate::routes::students::ProfileResponse,
        // Enrollment DTOs
        crate::routes::enrollments::EnrollRequest,
    )),
    tags(
        (name = "students", description = "Registration, login, and profile"),
        (name = "courses", description = "Course catalog"),
        (name = "enrollments", description = "Course enrollment management"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer-token security scheme referenced by the protected
/// paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_generates_and_lists_all_paths() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        for expected in [
            "/students/register",
            "/students/login",
            "/students/me",
            "/courses",
            "/enrollments",
            "/enrollments/{id}",
        ] {
            assert!(
                paths.iter().any(|p| *p == expected),
                "missing path {expected}, got {paths:?}"
            );
        }
    }
}
