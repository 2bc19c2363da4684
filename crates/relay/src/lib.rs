//! Destinations for messages received by the contact relay endpoint.
//!
//! The endpoint validates a [`ContactMessage`] and hands it to exactly one
//! [`ContactSink`]:
//!
//! - [`table::TableSink`] -- appends a row to `contact_messages`.
//! - [`email::EmailSink`] -- forwards the message over SMTP.
//! - [`webhook::WebhookSink`] -- POSTs the row to an external endpoint such as
//!   a spreadsheet append hook.
//! - [`memory::MemorySink`] -- keeps messages in memory, for tests.

use async_trait::async_trait;
use folio_core::contact::ContactMessage;

pub mod config;
pub mod email;
pub mod memory;
pub mod table;
pub mod webhook;

pub use config::RelayConfig;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for relay delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Relay unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Where validated contact messages are delivered.
#[async_trait]
pub trait ContactSink: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Deliver one message. Called once per submission; no retries.
    async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError>;
}
