//! # campus-api — Axum API Service for the Campus Enrollment Portal
//!
//! Registers and authenticates students, issues 72-hour session tokens,
//! lists the course catalog, and manages course enrollments over
//! PostgreSQL.
//!
//! ## API Surface
//!
//! | Route                      | Module                  | Auth   |
//! |----------------------------|-------------------------|--------|
//! | `POST /students/register`  | [`routes::students`]    | none   |
//! | `POST /students/login`     | [`routes::students`]    | none   |
//! | `GET  /students/me`        | [`routes::students`]    | bearer |
//! | `GET  /courses`            | [`routes::courses`]     | bearer |
//! | `POST /enrollments`        | [`routes::enrollments`] | bearer |
//! | `DELETE /enrollments/:id`  | [`routes::enrollments`] | bearer |
//! | `GET  /openapi.json`       | [`openapi`]             | none   |
//! | `GET  /health/*`           | [`app`]                 | none   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware (protected routes only) → Handler
//! ```

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the tracing and auth
/// layers so they stay cheap and credential-free; registration, login, and
/// the OpenAPI spec are public; everything else sits behind the bearer
/// middleware.
pub fn app(state: AppState) -> Router {
    let issuer = state.issuer.clone();

    // Bearer-protected routes.
    let protected = Router::new()
        .merge(routes::students::protected_router())
        .merge(routes::courses::router())
        .merge(routes::enrollments::router())
        .layer(from_fn(auth::auth_middleware));

    let api = Router::new()
        .merge(routes::students::public_router())
        .merge(openapi::router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(issuer))
        .with_state(state);

    // Unauthenticated health probes.
    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
