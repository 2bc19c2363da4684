//! Sink selection from the environment.

use std::sync::Arc;

use folio_db::DbPool;

use crate::email::{EmailConfig, EmailSink};
use crate::table::TableSink;
use crate::webhook::WebhookSink;
use crate::{ContactSink, RelayError};

/// Which sink receives contact messages.
#[derive(Debug, Clone)]
pub enum RelayConfig {
    Table,
    Email(EmailConfig),
    Webhook { url: String },
}

impl RelayConfig {
    /// Load relay configuration from environment variables.
    ///
    /// `CONTACT_SINK` selects `table` (default), `email` (requires the
    /// [`EmailConfig`] variables) or `webhook` (requires `CONTACT_WEBHOOK_URL`).
    ///
    /// # Panics
    ///
    /// Panics on an unknown sink or missing required variables.
    pub fn from_env() -> Self {
        let sink = std::env::var("CONTACT_SINK").unwrap_or_else(|_| "table".into());
        match sink.as_str() {
            "table" => Self::Table,
            "email" => Self::Email(
                EmailConfig::from_env()
                    .expect("SMTP_HOST and SMTP_TO must be set for CONTACT_SINK=email"),
            ),
            "webhook" => Self::Webhook {
                url: std::env::var("CONTACT_WEBHOOK_URL")
                    .expect("CONTACT_WEBHOOK_URL must be set for CONTACT_SINK=webhook"),
            },
            other => panic!("Unknown CONTACT_SINK '{other}'. Must be one of: table, email, webhook"),
        }
    }

    /// Construct the configured sink.
    pub fn build(&self, pool: &DbPool) -> Result<Arc<dyn ContactSink>, RelayError> {
        Ok(match self {
            Self::Table => Arc::new(TableSink::new(pool.clone())),
            Self::Email(config) => Arc::new(EmailSink::new(config.clone())?),
            Self::Webhook { url } => Arc::new(WebhookSink::new(url.clone())?),
        })
    }
}
