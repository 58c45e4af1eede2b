//! src/routes/mod.rs
use actix_web::http::StatusCode;
use actix_web::HttpResponse;

mod health_check;
pub use health_check::*;

mod book;
pub use book::*;

mod courses;
pub use courses::*;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Error body shared by every route: `{"detail": "<message>"}`.
pub(crate) fn detail_response(status: StatusCode, e: &impl std::fmt::Display) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "detail": e.to_string() }))
}
