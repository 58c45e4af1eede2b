//! src/domain/course.rs
use serde::{Deserialize, Serialize};

const TO_BE_ANNOUNCED: &str = "TBA";

/// A course together with its schedule, as stored.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub total_seats: i64,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl Course {
    pub fn date(&self) -> &str {
        self.date.as_deref().unwrap_or(TO_BE_ANNOUNCED)
    }

    pub fn start_time(&self) -> &str {
        self.start_time.as_deref().unwrap_or(TO_BE_ANNOUNCED)
    }

    pub fn end_time(&self) -> &str {
        self.end_time.as_deref().unwrap_or(TO_BE_ANNOUNCED)
    }
}

/// Seat usage of a course, as returned by `GET /courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseStats {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub total_seats: i64,
    pub booked_count: i64,
}

impl CourseStats {
    pub fn seats_left(&self) -> i64 {
        (self.total_seats - self.booked_count).max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingRecord {
    pub id: i64,
    pub user_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
