//! src/domain/user_email.rs
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Empty email")]
    Empty,
}

/// Email address of the person booking.
///
/// Only emptiness is checked; the address format is left to the mail server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn parse(s: String) -> Result<Self, Error> {
        let trimmed = super::trim_form_value(&s);
        if trimmed.is_empty() {
            return Err(Error::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
