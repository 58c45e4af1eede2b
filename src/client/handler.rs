//! src/client/handler.rs
use super::{BookingApi, BookingError};
use crate::domain::BookingRequest;

/// The form a booking is submitted from.
pub trait BookingForm {
    fn full_name(&self) -> String;
    fn email(&self) -> String;
    /// Clear every field.
    fn reset(&self);
}

/// A notification the user has to acknowledge before carrying on.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Runs after a booking went through, e.g. to refresh course statistics.
/// Fire-and-forget: the submission does not wait on or inspect it.
pub trait PostBookingHook {
    fn after_booking(&self, request: &BookingRequest);
}

impl<F> PostBookingHook for F
where
    F: Fn(&BookingRequest),
{
    fn after_booking(&self, request: &BookingRequest) {
        self(request)
    }
}

/// How a single submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Validation failed, nothing was sent.
    Aborted,
    Succeeded,
    Failed,
}

impl Outcome {
    /// Only a booking that went through counts as success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Submits booking forms for one course.
///
/// Holds no per-submission state, so overlapping calls to [`submit`] are
/// independent of each other.
///
/// [`submit`]: SubmissionHandler::submit
pub struct SubmissionHandler<N, H> {
    api: BookingApi,
    course_id: i64,
    notifier: N,
    hook: H,
}

impl<N, H> SubmissionHandler<N, H>
where
    N: Notifier,
    H: PostBookingHook,
{
    pub fn new(api: BookingApi, course_id: i64, notifier: N, hook: H) -> Self {
        Self {
            api,
            course_id,
            notifier,
            hook,
        }
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    #[tracing::instrument(
        name = "Submitting a booking",
        skip(self, form),
        fields(course_id = self.course_id)
    )]
    pub async fn submit<F>(&self, form: &F) -> Outcome
    where
        F: BookingForm + ?Sized,
    {
        let request = match BookingRequest::parse(form.full_name(), form.email(), self.course_id)
        {
            Ok(request) => request,
            Err(e) => {
                self.notifier.notify(&BookingError::from(e).to_string());
                return Outcome::Aborted;
            }
        };

        match self.api.book(&request).await {
            Ok(()) => {
                self.notifier.notify(&confirmation_message(&request));
                form.reset();
                self.hook.after_booking(&request);
                Outcome::Succeeded
            }
            Err(e) => {
                if let BookingError::Transport(_) = e {
                    tracing::error!(error.cause_chain = ?e, "Booking request failed");
                }
                self.notifier.notify(&e.to_string());
                Outcome::Failed
            }
        }
    }
}

fn confirmation_message(request: &BookingRequest) -> String {
    format!(
        "Booking successful! A confirmation email will be sent to {}.",
        request.email
    )
}
