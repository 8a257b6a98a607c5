//! Course catalog persistence operations.
//!
//! Courses are read-only reference data seeded by the migration; the only
//! operation is listing them.

use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

/// A course in the catalog.
#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct CourseRecord {
    /// Course id.
    pub id: i64,
    /// Course name.
    pub name: String,
}

/// List the full course catalog.
pub async fn list(pool: &PgPool) -> Result<Vec<CourseRecord>, sqlx::Error> {
    sqlx::query_as::<_, CourseRecord>("SELECT id, name FROM courses ORDER BY id")
        .fetch_all(pool)
        .await
}
