//! SMTP forwarding sink.
//!
//! [`EmailSink`] wraps the `lettre` async SMTP transport and forwards each
//! contact message to the site owner, with `Reply-To` set to the sender.

use async_trait::async_trait;
use folio_core::contact::ContactMessage;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::{ContactSink, RelayError};

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@folio.local";

/// Configuration for the SMTP sink.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Where contact messages are forwarded.
    pub to_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `SMTP_HOST` and `SMTP_TO` are set.
    ///
    /// | Variable        | Required | Default               |
    /// |-----------------|----------|-----------------------|
    /// | `SMTP_HOST`     | yes      | --                    |
    /// | `SMTP_TO`       | yes      | --                    |
    /// | `SMTP_PORT`     | no       | `587`                 |
    /// | `SMTP_FROM`     | no       | `noreply@folio.local` |
    /// | `SMTP_USER`     | no       | --                    |
    /// | `SMTP_PASSWORD` | no       | --                    |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let to_address = std::env::var("SMTP_TO").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            to_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailSink
// ---------------------------------------------------------------------------

pub struct EmailSink {
    config: EmailConfig,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailSink {
    pub fn new(config: EmailConfig) -> Result<Self, RelayError> {
        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: transport_builder.build(),
            config,
        })
    }
}

/// Assemble the forwarded email for `message`.
pub fn build_email(config: &EmailConfig, message: &ContactMessage) -> Result<Message, RelayError> {
    let message = message.normalized();
    let reply_to = Mailbox::new(Some(message.name.clone()), message.email.parse()?);

    Message::builder()
        .from(config.from_address.parse()?)
        .to(config.to_address.parse()?)
        .reply_to(reply_to)
        .subject(format!("[Contact] {}", message.subject))
        .header(ContentType::TEXT_PLAIN)
        .body(format!(
            "From: {} <{}>\n\n{}",
            message.name, message.email, message.message
        ))
        .map_err(|e| RelayError::Build(e.to_string()))
}

#[async_trait]
impl ContactSink for EmailSink {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError> {
        let email = build_email(&self.config, message)?;
        self.mailer.send(email).await?;
        tracing::info!(to = %self.config.to_address, "Contact message forwarded by email");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_address: DEFAULT_FROM_ADDRESS.into(),
            to_address: "owner@example.com".into(),
            smtp_user: None,
            smtp_password: None,
        }
    }

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello there".into(),
            message: "Let us build something.".into(),
        }
    }

    #[test]
    fn build_email_sets_reply_to_and_subject() {
        let email = build_email(&config(), &message()).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("Subject: [Contact] Hello there"));
        let reply_to = raw
            .lines()
            .find(|l| l.starts_with("Reply-To:"))
            .expect("Reply-To header present");
        assert!(reply_to.contains("ada@example.com"));
        assert!(raw.contains("owner@example.com"));
    }

    #[test]
    fn build_email_rejects_bad_sender_address() {
        let bad = ContactMessage {
            email: "not-an-email".into(),
            ..message()
        };
        assert_matches!(build_email(&config(), &bad), Err(RelayError::Address(_)));
    }

    #[test]
    fn relay_error_display_build() {
        let err = RelayError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
