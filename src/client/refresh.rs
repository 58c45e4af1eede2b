//! src/client/refresh.rs
use super::{BookingApi, PostBookingHook};
use crate::domain::{BookingRequest, CourseStats};
use std::fmt::Write;
use std::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

type Refresh = JoinHandle<Option<Vec<CourseStats>>>;

/// Fetches course statistics in the background after every booking.
pub struct StatsRefresh {
    api: BookingApi,
    pending: Mutex<Vec<Refresh>>,
}

impl StatsRefresh {
    pub fn new(api: BookingApi) -> Self {
        Self {
            api,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Wait for every refresh started so far and return the most recent
    /// statistics that came back.
    pub async fn finish(&self) -> Option<Vec<CourseStats>> {
        let pending: Vec<Refresh> = lock(&self.pending).drain(..).collect();

        let mut latest = None;
        for handle in pending {
            match handle.await {
                Ok(Some(stats)) => latest = Some(stats),
                Ok(None) => {}
                Err(e) => tracing::warn!(error.cause_chain = ?e, "Statistics refresh panicked"),
            }
        }
        latest
    }
}

fn lock(pending: &Mutex<Vec<Refresh>>) -> MutexGuard<'_, Vec<Refresh>> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl PostBookingHook for StatsRefresh {
    fn after_booking(&self, _request: &BookingRequest) {
        let api = self.api.clone();
        let handle = tokio::spawn(async move {
            match api.course_stats().await {
                Ok(stats) => Some(stats),
                Err(e) => {
                    tracing::warn!(
                        error.cause_chain = ?e,
                        "Failed to refresh course statistics"
                    );
                    None
                }
            }
        });
        lock(&self.pending).push(handle);
    }
}

/// One line per course: id, name, booked/total and seats left.
pub fn render_stats(stats: &[CourseStats]) -> String {
    let mut table = format!(
        "{:>4}  {:<40} {:>6} {:>6}\n",
        "id", "course", "booked", "left"
    );
    for course in stats {
        let _ = writeln!(
            table,
            "{:>4}  {:<40} {:>6} {:>6}",
            course.id,
            course.name,
            format!("{}/{}", course.booked_count, course.total_seats),
            course.seats_left()
        );
    }
    table
}
