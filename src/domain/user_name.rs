//! src/domain/user_name.rs
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("A name must not be empty")]
    Empty,
}

/// Full name of the person booking, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserName(String);

impl UserName {
    pub fn parse(s: String) -> Result<Self, Error> {
        let trimmed = super::trim_form_value(&s);
        if trimmed.is_empty() {
            return Err(Error::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
