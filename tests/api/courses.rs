//! tests/api/courses.rs

use crate::helpers::{booking, course, setup, setup_with_courses};

#[tokio::test]
async fn courses_lists_the_configured_courses() {
    // Arrange
    let test = setup().await;

    // Act
    let response = test.get("/courses").await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let courses: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["id"], 1);
    assert_eq!(courses[0]["name"], "Artificial Intelligence (AI)");
    assert_eq!(courses[0]["total_seats"], 10);
    assert_eq!(courses[0]["booked_count"], 0);
    assert_eq!(courses[1]["name"], "Quantum Computing");
}

#[tokio::test]
async fn booked_count_follows_bookings() {
    // Arrange
    let test = setup_with_courses(vec![course(1, 5), course(2, 5)]).await;

    // Act
    test.post_booking(&booking("Jane Doe", 2)).await;
    test.post_booking(&booking("John Roe", 2)).await;

    // Assert
    let stats = test.course_stats().await;
    assert_eq!(stats[0].booked_count, 0);
    assert_eq!(stats[1].booked_count, 2);
    assert_eq!(stats[1].seats_left(), 3);
}

#[tokio::test]
async fn bookings_of_an_unknown_course_is_a_404() {
    // Arrange
    let test = setup().await;

    // Act
    let response = test.get("/courses/42/bookings").await;

    // Assert
    assert_eq!(404, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Course not found");
}

#[tokio::test]
async fn bookings_are_listed_per_course() {
    // Arrange
    let test = setup().await;
    test.post_booking(&booking("Jane Doe", 1)).await;
    test.post_booking(&booking("John Roe", 2)).await;

    // Act
    let bookings = test.course_bookings(1).await;

    // Assert
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].user_name, "Jane Doe");
    assert_eq!(bookings[0].email.as_deref(), Some("jane.doe@example.com"));
}
