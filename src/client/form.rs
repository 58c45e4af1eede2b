//! src/client/form.rs
use super::BookingForm;
use std::sync::{Mutex, MutexGuard};

/// Form fields held in memory, shareable between overlapping submissions.
#[derive(Debug, Default)]
pub struct InMemoryForm {
    full_name: Mutex<String>,
    email: Mutex<String>,
}

impl InMemoryForm {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: Mutex::new(full_name.into()),
            email: Mutex::new(email.into()),
        }
    }

    pub fn set_full_name(&self, full_name: impl Into<String>) {
        *lock(&self.full_name) = full_name.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        *lock(&self.email) = email.into();
    }
}

// A panic while holding the lock leaves a plain string behind, still usable.
fn lock(field: &Mutex<String>) -> MutexGuard<'_, String> {
    field.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl BookingForm for InMemoryForm {
    fn full_name(&self) -> String {
        lock(&self.full_name).clone()
    }

    fn email(&self) -> String {
        lock(&self.email).clone()
    }

    fn reset(&self) {
        lock(&self.full_name).clear();
        lock(&self.email).clear();
    }
}
