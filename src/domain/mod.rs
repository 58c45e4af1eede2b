//! src/domain/mod.rs
mod booking_request;
pub use booking_request::{BookingRequest, Error as BookingRequestError};

mod course;
pub use course::{BookingRecord, Course, CourseStats};

mod user_email;
pub use user_email::UserEmail;

mod user_name;
pub use user_name::UserName;

/// Trim the way a browser form does: Unicode whitespace plus the byte order mark.
fn trim_form_value(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
