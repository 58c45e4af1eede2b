//! src/routes/book.rs
use crate::domain::{BookingRequest, BookingRequestError};
use crate::email::Mailer;
use crate::routes::{detail_response, error_chain_fmt};
use crate::startup::ApplicationBaseUrl;
use crate::store::{self, ReserveError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum BookError {
    #[error(transparent)]
    ValidationError(#[from] BookingRequestError),
    #[error("Course not found")]
    CourseNotFound,
    #[error("Course is full")]
    CourseFull,
    #[error("Internal server error: {0}")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for BookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for BookError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookError::CourseNotFound => StatusCode::NOT_FOUND,
            BookError::CourseFull => StatusCode::BAD_REQUEST,
            BookError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        detail_response(self.status_code(), self)
    }
}

impl From<ReserveError> for BookError {
    fn from(e: ReserveError) -> Self {
        match e {
            ReserveError::CourseNotFound => BookError::CourseNotFound,
            ReserveError::CourseFull => BookError::CourseFull,
            ReserveError::Database(e) => BookError::UnexpectedError(
                anyhow::Error::new(e).context("Failed to store the booking"),
            ),
        }
    }
}

#[derive(serde::Deserialize)]
pub struct BookingPayload {
    pub user_name: String,
    pub course_id: i64,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(serde::Serialize)]
struct BookingResponse {
    message: &'static str,
}

#[tracing::instrument(
    name = "Booking a course",
    skip(form, pool, mailer, base_url),
    fields(
        request_id = %Uuid::new_v4(),
        user_email = %form.email,
        course_id = %form.course_id
    )
)]
pub async fn book(
    form: web::Json<BookingPayload>,
    pool: web::Data<SqlitePool>,
    mailer: web::Data<Mailer>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> Result<HttpResponse, BookError> {
    let BookingPayload {
        user_name,
        course_id,
        email,
        phone,
    } = form.into_inner();
    let request = BookingRequest::parse(user_name, email, course_id)?;
    let phone = phone
        .map(|phone| phone.trim().to_string())
        .filter(|phone| !phone.is_empty());

    let course = store::reserve_seat(&pool, &request, phone.as_deref()).await?;
    tracing::info!("Booked course {} ({})", course.id, course.name);

    let delivery = mailer
        .send_confirmation(&request, &course, &base_url.0)
        .await;
    mailer.notify_owner(&request, phone.as_deref(), &course).await;

    let message = if delivery.is_sent() {
        "Booking successful! Confirmation email sent."
    } else {
        "Booking successful! But confirmation email could not be sent."
    };

    Ok(HttpResponse::Ok().json(BookingResponse { message }))
}

/// Turns JSON extraction failures into `422 {"detail": ..}` responses.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    let response = detail_response(StatusCode::UNPROCESSABLE_ENTITY, &err);
    actix_web::error::InternalError::from_response(err, response).into()
}
