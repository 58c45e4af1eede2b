//! src/routes/courses.rs
use crate::routes::{detail_response, error_chain_fmt};
use crate::store;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use sqlx::SqlitePool;

#[derive(thiserror::Error)]
pub enum CoursesError {
    #[error("Course not found")]
    NotFound,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CoursesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for CoursesError {
    fn status_code(&self) -> StatusCode {
        match self {
            CoursesError::NotFound => StatusCode::NOT_FOUND,
            CoursesError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        detail_response(self.status_code(), self)
    }
}

/// `GET /courses`: every course with its number of bookings.
pub async fn list_courses(pool: web::Data<SqlitePool>) -> Result<HttpResponse, CoursesError> {
    let courses = store::course_stats(&pool)
        .await
        .context("Failed to fetch course statistics")?;

    Ok(HttpResponse::Ok().json(courses))
}

#[derive(serde::Deserialize)]
pub struct CoursePath {
    course_id: i64,
}

#[tracing::instrument(
    name = "Listing course bookings",
    skip(path, pool),
    fields(course_id = path.course_id)
)]
pub async fn course_bookings(
    path: web::Path<CoursePath>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, CoursesError> {
    let course_id = path.course_id;

    store::find_course(&pool, course_id)
        .await
        .context("Failed to fetch course")?
        .ok_or(CoursesError::NotFound)?;

    let bookings = store::course_bookings(&pool, course_id)
        .await
        .with_context(|| format!("Failed to fetch bookings of course {}", course_id))?;

    Ok(HttpResponse::Ok().json(bookings))
}
