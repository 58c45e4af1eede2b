//! src/domain/booking_request.rs
use super::{user_email, user_name, UserEmail, UserName};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Please enter your name and email.")]
    MissingName(#[source] user_name::Error),
    #[error("Please enter your name and email.")]
    MissingEmail(#[source] user_email::Error),
}

/// A single booking attempt, built fresh for every form submission.
///
/// Serializes to `{"user_name": .., "course_id": .., "email": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub user_name: UserName,
    pub course_id: i64,
    pub email: UserEmail,
}

impl BookingRequest {
    pub fn parse(user_name: String, email: String, course_id: i64) -> Result<Self, Error> {
        let user_name = UserName::parse(user_name).map_err(Error::MissingName)?;
        let email = UserEmail::parse(email).map_err(Error::MissingEmail)?;

        Ok(Self {
            user_name,
            course_id,
            email,
        })
    }
}
