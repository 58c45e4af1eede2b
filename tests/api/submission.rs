//! tests/api/submission.rs
//!
//! The submission handler talking to a running application.

use crate::helpers::{course, setup, setup_with_courses, RecordingHook, RecordingNotifier};
use coursebook::client::{BookingForm, InMemoryForm, Outcome, SubmissionHandler};

#[tokio::test]
async fn a_successful_submission_books_a_seat() {
    // Arrange
    let test = setup().await;
    let notifier = RecordingNotifier::default();
    let hook = RecordingHook::default();
    let handler = SubmissionHandler::new(test.booking_api(), 1, notifier.clone(), hook.clone());
    let form = InMemoryForm::new(" Jane Doe ", "jane@example.com");

    // Act
    let outcome = handler.submit(&form).await;

    // Assert
    assert_eq!(outcome, Outcome::Succeeded);
    assert_eq!(form.full_name(), "");
    assert_eq!(form.email(), "");

    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("jane@example.com"));

    let calls = hook.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].user_name.as_ref(), "Jane Doe");

    let stats = test.booking_api().course_stats().await.unwrap();
    assert_eq!(stats[0].booked_count, 1);
}

#[tokio::test]
async fn a_full_course_is_reported_with_the_server_detail() {
    // Arrange
    let test = setup_with_courses(vec![course(1, 0)]).await;
    let notifier = RecordingNotifier::default();
    let hook = RecordingHook::default();
    let handler = SubmissionHandler::new(test.booking_api(), 1, notifier.clone(), hook.clone());
    let form = InMemoryForm::new("Jane Doe", "jane@example.com");

    // Act
    let outcome = handler.submit(&form).await;

    // Assert
    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(notifier.messages(), vec!["Error: Course is full".to_string()]);
    assert_eq!(form.full_name(), "Jane Doe");
    assert!(hook.calls().is_empty());
}

#[tokio::test]
async fn an_unknown_course_is_reported_with_the_server_detail() {
    // Arrange
    let test = setup().await;
    let notifier = RecordingNotifier::default();
    let handler = SubmissionHandler::new(
        test.booking_api(),
        404,
        notifier.clone(),
        RecordingHook::default(),
    );

    // Act
    let outcome = handler
        .submit(&InMemoryForm::new("Jane Doe", "jane@example.com"))
        .await;

    // Assert
    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(notifier.messages(), vec!["Error: Course not found".to_string()]);
}

#[tokio::test]
async fn a_blank_form_never_reaches_the_server() {
    // Arrange
    let test = setup().await;
    let notifier = RecordingNotifier::default();
    let handler = SubmissionHandler::new(
        test.booking_api(),
        1,
        notifier.clone(),
        RecordingHook::default(),
    );

    // Act
    let outcome = handler.submit(&InMemoryForm::new("Jane Doe", " ")).await;

    // Assert
    assert_eq!(outcome, Outcome::Aborted);
    assert_eq!(
        notifier.messages(),
        vec!["Please enter your name and email.".to_string()]
    );
    assert!(test.course_bookings(1).await.is_empty());
}
