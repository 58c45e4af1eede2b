//! src/email/mod.rs
mod mailer;
pub use mailer::{Delivery, Mailer};

pub mod templates;
