//! src/store.rs
use crate::configuration::{CourseSettings, DatabaseSettings};
use crate::domain::{BookingRecord, BookingRequest, Course, CourseStats};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(thiserror::Error, Debug)]
pub enum ReserveError {
    #[error("Course not found")]
    CourseNotFound,
    #[error("Course is full")]
    CourseFull,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Open a pool against `settings.url`, creating the database file if needed.
///
/// Idle connections are never reaped so that `sqlite::memory:` databases
/// survive for the lifetime of the pool.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[tracing::instrument(name = "Seeding courses", skip(pool, courses), fields(count = courses.len()))]
pub async fn seed_courses(
    pool: &SqlitePool,
    courses: &[CourseSettings],
    reset: bool,
) -> Result<(), sqlx::Error> {
    let mut transaction = pool.begin().await?;

    if reset {
        sqlx::query("DELETE FROM bookings")
            .execute(&mut *transaction)
            .await?;
        sqlx::query("DELETE FROM courses")
            .execute(&mut *transaction)
            .await?;
        tracing::info!("Cleared all bookings and courses");
    }

    for course in courses {
        let schedule = course.schedule.as_ref();
        sqlx::query(
            r#"
    INSERT INTO courses (id, name, description, total_seats, date, start_time, end_time)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT (id) DO UPDATE SET
        name = excluded.name,
        description = excluded.description,
        total_seats = excluded.total_seats,
        date = excluded.date,
        start_time = excluded.start_time,
        end_time = excluded.end_time
            "#,
        )
        .bind(course.id)
        .bind(&course.name)
        .bind(&course.description)
        .bind(course.total_seats)
        .bind(schedule.and_then(|s| s.date.as_deref()))
        .bind(schedule.and_then(|s| s.start.as_deref()))
        .bind(schedule.and_then(|s| s.end.as_deref()))
        .execute(&mut *transaction)
        .await
        .map_err(|e| {
            tracing::error!("Failed to seed course {}: {:#?}", course.id, e);
            e
        })?;
    }

    transaction.commit().await
}

#[tracing::instrument(name = "Fetching course statistics", skip(pool))]
pub async fn course_stats(pool: &SqlitePool) -> Result<Vec<CourseStats>, sqlx::Error> {
    sqlx::query_as::<_, CourseStats>(
        r#"
        SELECT c.id, c.name, c.description, c.total_seats, COUNT(b.id) AS booked_count
        FROM courses c
        LEFT JOIN bookings b ON b.course_id = c.id
        GROUP BY c.id
        ORDER BY c.id
        "#,
    )
    .fetch_all(pool)
    .await
}

#[tracing::instrument(name = "Fetching course", skip(pool))]
pub async fn find_course(pool: &SqlitePool, course_id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, name, description, total_seats, date, start_time, end_time
        FROM courses
        WHERE id = ?1
        "#,
    )
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

#[tracing::instrument(name = "Fetching course bookings", skip(pool))]
pub async fn course_bookings(
    pool: &SqlitePool,
    course_id: i64,
) -> Result<Vec<BookingRecord>, sqlx::Error> {
    sqlx::query_as::<_, BookingRecord>(
        r#"
        SELECT id, user_name, email, phone
        FROM bookings
        WHERE course_id = ?1
        ORDER BY id
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}

/// Store a booking if the course still has a free seat.
///
/// The seat count and the insert are one autocommit statement, so SQLite
/// holds the write lock before counting and concurrent bookings wait on the
/// busy timeout.
#[tracing::instrument(
    name = "Saving new booking in the database",
    skip(pool, request, phone),
    fields(course_id = request.course_id)
)]
pub async fn reserve_seat(
    pool: &SqlitePool,
    request: &BookingRequest,
    phone: Option<&str>,
) -> Result<Course, ReserveError> {
    let inserted = sqlx::query(
        r#"
    INSERT INTO bookings (user_name, course_id, email, phone)
    SELECT ?1, c.id, ?3, ?4
    FROM courses c
    WHERE c.id = ?2
      AND (SELECT COUNT(*) FROM bookings WHERE course_id = c.id) < c.total_seats
            "#,
    )
    .bind(request.user_name.as_ref())
    .bind(request.course_id)
    .bind(request.email.as_ref())
    .bind(phone)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:#?}", e);
        e
    })?;

    let course = find_course(pool, request.course_id)
        .await?
        .ok_or(ReserveError::CourseNotFound)?;

    if inserted.rows_affected() == 0 {
        return Err(ReserveError::CourseFull);
    }

    Ok(course)
}
