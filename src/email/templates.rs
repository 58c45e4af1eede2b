//! src/email/templates.rs
use crate::domain::{BookingRequest, Course};
use htmlescape::encode_minimal;

#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Confirmation sent to the person who booked.
pub fn confirmation(request: &BookingRequest, course: &Course, base_url: &str) -> RenderedEmail {
    let subject = format!("Booking Confirmed — {}", course.name);

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Booking Confirmed</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <h1>Booking Confirmed!</h1>
    <p>Hello <strong>{user_name}</strong>,</p>
    <p>Your booking is confirmed for:</p>
    <h2>{course_name} Course</h2>
    <p><strong>Date:</strong> {date}</p>
    <p><strong>Time:</strong> {start} - {end}</p>
    <p>We're excited to see you in this course!</p>
    <p><a href="{base_url}">Confirm Your Booking</a></p>
    <p>Best regards,<br><strong>Course Team</strong></p>
</body>
</html>"#,
        user_name = encode_minimal(request.user_name.as_ref()),
        course_name = encode_minimal(&course.name),
        date = encode_minimal(course.date()),
        start = encode_minimal(course.start_time()),
        end = encode_minimal(course.end_time()),
        base_url = encode_minimal(base_url),
    );

    let text = format!(
        "Hello {user_name},

Thank you for booking the course: {course_name}.

Course Details:
  Date: {date}
  Time: {start} - {end}

We look forward to seeing you!

Course Team
",
        user_name = request.user_name,
        course_name = course.name,
        date = course.date(),
        start = course.start_time(),
        end = course.end_time(),
    );

    RenderedEmail {
        subject,
        html,
        text,
    }
}

/// Notification sent to the course owner for every new booking.
pub fn owner_notification(
    request: &BookingRequest,
    phone: Option<&str>,
    course: &Course,
) -> RenderedEmail {
    let subject = format!(
        "New Booking: {} registered for {}",
        request.user_name, course.name
    );
    let phone = phone.unwrap_or("-");

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>New Course Booking</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <h1>New Course Booking Received</h1>
    <p>A new student has booked a course. Here are the details:</p>
    <ul>
        <li><strong>Student Name:</strong> {user_name}</li>
        <li><strong>Email:</strong> {email}</li>
        <li><strong>Phone:</strong> {phone}</li>
        <li><strong>Course:</strong> {course_name}</li>
        <li><strong>Date:</strong> {date}</li>
        <li><strong>Time:</strong> {start} - {end}</li>
    </ul>
    <p>Best regards,<br><strong>Course Booking System</strong></p>
</body>
</html>"#,
        user_name = encode_minimal(request.user_name.as_ref()),
        email = encode_minimal(request.email.as_ref()),
        phone = encode_minimal(phone),
        course_name = encode_minimal(&course.name),
        date = encode_minimal(course.date()),
        start = encode_minimal(course.start_time()),
        end = encode_minimal(course.end_time()),
    );

    let text = format!(
        "New Course Booking Notification

Student Name: {user_name}
Email: {email}
Phone: {phone}
Course: {course_name}
Date: {date}
Time: {start} - {end}

Course Booking System
",
        user_name = request.user_name,
        email = request.email,
        course_name = course.name,
        date = course.date(),
        start = course.start_time(),
        end = course.end_time(),
    );

    RenderedEmail {
        subject,
        html,
        text,
    }
}
