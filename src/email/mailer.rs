//! src/email/mailer.rs
use super::templates::{self, RenderedEmail};
use crate::configuration::{EmailSettings, SmtpSettings};
use crate::domain::{BookingRequest, Course};
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// What happened to a confirmation email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Not sent, a copy was written to the outbox.
    Saved(PathBuf),
    /// Not sent and not saved.
    Lost,
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent)
    }
}

pub struct Mailer {
    sender: Mailbox,
    owner: Option<Mailbox>,
    transport: Option<SmtpTransport>,
    outbox_dir: PathBuf,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("sender", &self.sender.to_string())
            .field("owner", &self.owner.as_ref().map(|o| o.to_string()))
            .field("smtp", &self.transport.is_some())
            .field("outbox_dir", &self.outbox_dir)
            .finish()
    }
}

impl Mailer {
    pub fn from_settings(settings: &EmailSettings) -> Result<Self, anyhow::Error> {
        let sender_address: Address = settings
            .sender_email
            .parse()
            .with_context(|| format!("Invalid sender email {}", settings.sender_email))?;
        let sender = Mailbox::new(Some(settings.sender_name.clone()), sender_address);

        let owner = settings
            .owner_email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
            .map(|email| {
                email
                    .parse::<Address>()
                    .map(|address| Mailbox::new(None, address))
                    .with_context(|| format!("Invalid owner email {}", email))
            })
            .transpose()?;

        let transport = settings
            .smtp
            .as_ref()
            .map(smtp_transport)
            .transpose()
            .context("Failed to configure the SMTP transport")?;

        Ok(Self {
            sender,
            owner,
            transport,
            outbox_dir: settings.outbox_dir.clone(),
        })
    }

    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }

    /// Send the booking confirmation to the student.
    ///
    /// Never fails: when SMTP is missing or rejects the message, the email is
    /// written to the outbox instead.
    #[tracing::instrument(
        name = "Sending a confirmation email",
        skip(self, request, course, base_url),
        fields(course_id = course.id)
    )]
    pub async fn send_confirmation(
        &self,
        request: &BookingRequest,
        course: &Course,
        base_url: &str,
    ) -> Delivery {
        let email = templates::confirmation(request, course, base_url);
        let recipient = request.email.as_ref();

        let Some(transport) = &self.transport else {
            return self
                .save_to_outbox(recipient, &email, course.id, "SMTP not configured")
                .await;
        };

        let result = match recipient.parse::<Address>() {
            Ok(address) => {
                let to = Mailbox::new(Some(request.user_name.to_string()), address);
                self.deliver(transport, to, &email).await
            }
            Err(e) => {
                Err(anyhow::Error::new(e).context(format!("Invalid recipient {}", recipient)))
            }
        };

        match result {
            Ok(()) => Delivery::Sent,
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    "Failed to send confirmation email via SMTP"
                );
                self.save_to_outbox(recipient, &email, course.id, "SMTP error").await
            }
        }
    }

    /// Tell the course owner about a new booking. Returns whether the
    /// notification went out.
    #[tracing::instrument(
        name = "Sending an owner notification",
        skip(self, request, phone, course),
        fields(course_id = course.id)
    )]
    pub async fn notify_owner(
        &self,
        request: &BookingRequest,
        phone: Option<&str>,
        course: &Course,
    ) -> bool {
        let (Some(transport), Some(owner)) = (&self.transport, &self.owner) else {
            tracing::info!("Owner email not configured, skipping owner notification");
            return false;
        };

        let email = templates::owner_notification(request, phone, course);
        match self.deliver(transport, owner.clone(), &email).await {
            Ok(()) => {
                tracing::info!("Owner notification sent to {}", owner);
                true
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    "Failed to send owner notification"
                );
                false
            }
        }
    }

    async fn deliver(
        &self,
        transport: &SmtpTransport,
        to: Mailbox,
        email: &RenderedEmail,
    ) -> Result<(), anyhow::Error> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .context("Failed to build email message")?;

        let transport = transport.clone();
        spawn_blocking_with_tracing(move || transport.send(&message))
            .await
            .context("Failed to spawn blocking thread")?
            .context("SMTP server rejected the message")?;

        Ok(())
    }

    async fn save_to_outbox(
        &self,
        recipient: &str,
        email: &RenderedEmail,
        course_id: i64,
        reason: &'static str,
    ) -> Delivery {
        let file_name = format!(
            "email_{}_{}_{}.html",
            course_id,
            chrono::Utc::now().timestamp(),
            Uuid::new_v4().simple()
        );
        let path = self.outbox_dir.join(file_name);
        let contents = format!(
            "To: {}\nSubject: {}\n\n{}",
            recipient, email.subject, email.html
        );

        let outbox_dir = self.outbox_dir.clone();
        let target = path.clone();
        let written = spawn_blocking_with_tracing(move || {
            std::fs::create_dir_all(&outbox_dir)?;
            std::fs::write(&target, contents)
        })
        .await;

        match written {
            Ok(Ok(())) => {
                tracing::info!("Email saved to {} ({})", path.display(), reason);
                Delivery::Saved(path)
            }
            Ok(Err(e)) => {
                tracing::error!(error.cause_chain = ?e, "Failed to save email to disk");
                Delivery::Lost
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to spawn blocking thread");
                Delivery::Lost
            }
        }
    }
}

/// STARTTLS and login are only attempted when a username is configured.
fn smtp_transport(smtp: &SmtpSettings) -> Result<SmtpTransport, lettre::transport::smtp::Error> {
    let mut builder = SmtpTransport::builder_dangerous(smtp.host.as_str())
        .port(smtp.port)
        .timeout(Some(SMTP_TIMEOUT));

    if let Some(user) = &smtp.user {
        let password = smtp
            .pass
            .as_ref()
            .map(|pass| pass.expose_secret().to_string())
            .unwrap_or_default();
        builder = builder
            .tls(Tls::Opportunistic(TlsParameters::new(smtp.host.clone())?))
            .credentials(Credentials::new(user.clone(), password));
    }

    Ok(builder.build())
}
