//! src/client/mod.rs
//!
//! Client side of a booking: read the form, validate it, `POST /book` and
//! tell the user what happened.
mod api;
pub use api::{BookingApi, BookingError};

mod form;
pub use form::InMemoryForm;

mod handler;
pub use handler::{BookingForm, Notifier, Outcome, PostBookingHook, SubmissionHandler};

mod refresh;
pub use refresh::{render_stats, StatsRefresh};
