//! tests/api/book.rs

use crate::helpers::{booking, course, extract_links, setup, setup_with_courses};

#[tokio::test]
async fn book_returns_a_200_for_a_valid_booking() {
    // Arrange
    let test = setup().await;

    // Act
    let response = test.post_booking(&booking("Jane Doe", 1)).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Booking successful! But confirmation email could not be sent."
    );
}

#[tokio::test]
async fn book_persists_the_new_booking() {
    // Arrange
    let test = setup().await;
    let body = serde_json::json!({
        "user_name": "  Ursula Le Guin ",
        "course_id": 2,
        "email": "ursula_le_guin@gmail.com",
        "phone": " +1 555 0100 "
    });

    // Act
    test.post_booking(&body).await;

    // Assert
    let saved = test.course_bookings(2).await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].user_name, "Ursula Le Guin");
    assert_eq!(saved[0].email.as_deref(), Some("ursula_le_guin@gmail.com"));
    assert_eq!(saved[0].phone.as_deref(), Some("+1 555 0100"));
}

#[tokio::test]
async fn blank_phone_is_stored_as_missing() {
    // Arrange
    let test = setup().await;
    let mut body = booking("Jane Doe", 1);
    body["phone"] = serde_json::json!("   ");

    // Act
    test.post_booking(&body).await;

    // Assert
    assert_eq!(test.course_bookings(1).await[0].phone, None);
}

#[tokio::test]
async fn book_saves_the_confirmation_email_without_smtp() {
    // Arrange
    let test = setup().await;

    // Act
    test.post_booking(&booking("Jane Doe", 1)).await;

    // Assert
    let files = test.outbox_files();
    assert_eq!(files.len(), 1, "Expected 1 email in the outbox, found {:?}", files);

    let email = std::fs::read_to_string(&files[0]).unwrap();
    assert!(email.starts_with("To: jane.doe@example.com\n"));
    assert!(email.contains("Subject: Booking Confirmed — Artificial Intelligence (AI)"));
    assert!(email.contains("December 1, 2025"));
    assert!(email.contains("5:00 PM - 5:30 PM"));

    let links = extract_links(&email);
    assert_eq!(links, vec![test.base_url.clone()]);
}

#[tokio::test]
async fn book_returns_a_404_for_an_unknown_course() {
    // Arrange
    let test = setup().await;

    // Act
    let response = test.post_booking(&booking("Jane Doe", 99)).await;

    // Assert
    assert_eq!(404, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Course not found");
    assert!(test.outbox_files().is_empty());
}

#[tokio::test]
async fn book_returns_a_400_once_the_course_is_full() {
    // Arrange
    let test = setup_with_courses(vec![course(1, 1)]).await;
    test.post_booking(&booking("First", 1)).await;

    // Act
    let response = test.post_booking(&booking("Second", 1)).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Course is full");
    assert_eq!(test.course_bookings(1).await.len(), 1);
}

#[tokio::test]
async fn concurrent_bookings_never_exceed_the_seats() {
    // Arrange
    let test = setup_with_courses(vec![course(1, 3)]).await;

    // Act
    let mut handles = Vec::new();
    for i in 0..10 {
        let client = test.api_client.clone();
        let url = format!("{}/book", test.address);
        let body = booking(&format!("Student {}", i), 1);
        handles.push(tokio::spawn(async move {
            client
                .post(url)
                .json(&body)
                .send()
                .await
                .expect("Failed to execute request.")
                .status()
                .as_u16()
        }));
    }
    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    // Assert
    assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 3);
    assert_eq!(statuses.iter().filter(|s| **s == 400).count(), 7);
    assert_eq!(test.course_stats().await[0].booked_count, 3);
}

#[tokio::test]
async fn book_returns_a_422_when_name_or_email_is_blank() {
    // Arrange
    let test = setup().await;
    let test_cases = vec![
        (serde_json::json!({"user_name": "", "course_id": 1, "email": "a@b.c"}), "empty name"),
        (serde_json::json!({"user_name": "Jane", "course_id": 1, "email": "   "}), "blank email"),
    ];

    for (body, error_message) in test_cases {
        // Act
        let response = test.post_booking(&body).await;

        // Assert
        assert_eq!(
            422,
            response.status().as_u16(),
            // Additional customised error message on test failure
            "The API did not fail with 422 Unprocessable Entity when the payload was {}.",
            error_message
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["detail"], "Please enter your name and email.");
    }
    assert!(test.course_bookings(1).await.is_empty());
}

#[tokio::test]
async fn book_returns_a_422_when_the_payload_is_malformed() {
    // Arrange
    let test = setup().await;
    let test_cases = vec![
        (r#"{"user_name": "Jane", "email": "a@b.c"}"#, "missing the course id"),
        (r#"{"course_id": 1, "email": "a@b.c"}"#, "missing the name"),
        (r#"{"user_name": "Jane", "course_id": "one", "email": "a@b.c"}"#, "non-numeric course id"),
        ("user_name=Jane", "not json"),
    ];

    for (body, error_message) in test_cases {
        // Act
        let response = test.post_raw_booking(body).await;

        // Assert
        assert_eq!(
            422,
            response.status().as_u16(),
            "The API did not fail with 422 Unprocessable Entity when the payload was {}.",
            error_message
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["detail"].is_string(), "No detail when payload was {}", error_message);
    }
}
