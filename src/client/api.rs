//! src/client/api.rs
use crate::domain::{BookingRequest, BookingRequestError, CourseStats};
use crate::routes::error_chain_fmt;
use reqwest::Client;
use serde_json::Value;

const UNKNOWN_ERROR: &str = "Unknown error";

/// The three ways a booking can fail. `Display` is the exact text shown to
/// the user.
#[derive(thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] BookingRequestError),
    #[error("Error: {0}")]
    Application(String),
    #[error("Booking failed. Please try again.")]
    Transport(#[source] reqwest::Error),
}

impl std::fmt::Debug for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone)]
pub struct BookingApi {
    http_client: Client,
    base_url: String,
}

impl BookingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    /// `POST /book`. Any 2xx is a success and its body is ignored; any other
    /// status is an application error carrying the body's `detail`.
    pub async fn book(&self, request: &BookingRequest) -> Result<(), BookingError> {
        let response = self
            .http_client
            .post(format!("{}/book", self.base_url))
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(BookingError::Transport)?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body: Value = response.json().await.map_err(BookingError::Transport)?;
        let detail = error_detail(&body);
        tracing::debug!(%status, %detail, "Booking rejected by the server");

        Err(BookingError::Application(detail))
    }

    /// `GET /courses`.
    pub async fn course_stats(&self) -> Result<Vec<CourseStats>, reqwest::Error> {
        self.http_client
            .get(format!("{}/courses", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// A falsy `detail` (absent, `null`, `""`, `0` or `false`) reads as
/// "Unknown error"; any other non-string `detail` is shown as its JSON text.
fn error_detail(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
        Some(Value::Bool(true)) => true.to_string(),
        _ => UNKNOWN_ERROR.to_string(),
    }
}
