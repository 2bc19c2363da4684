//! Webhook sink.
//!
//! Sends each message as one JSON row to an external endpoint (for example a
//! spreadsheet append hook). One attempt per submission.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use folio_core::contact::ContactMessage;

use crate::{ContactSink, RelayError};

/// HTTP request timeout for a single delivery.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

/// The JSON row posted for `message`.
pub fn webhook_payload(message: &ContactMessage) -> serde_json::Value {
    let message = message.normalized();
    serde_json::json!({
        "email": message.email,
        "name": message.name,
        "subject": message.subject,
        "message": message.message,
        "submitted_at": Utc::now().to_rfc3339(),
    })
}

#[async_trait]
impl ContactSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError> {
        let response = self
            .client
            .post(&self.url)
            .json(&webhook_payload(message))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RelayError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_trimmed_fields() {
        let payload = webhook_payload(&ContactMessage {
            name: " Ada ".into(),
            email: "ada@example.com".into(),
            subject: "Hi there".into(),
            message: "A message body".into(),
        });
        assert_eq!(payload["name"], "Ada");
        assert_eq!(payload["email"], "ada@example.com");
        assert!(payload["submitted_at"].is_string());
    }

    #[test]
    fn webhook_error_display_http_status() {
        let err = RelayError::HttpStatus(502);
        assert_eq!(err.to_string(), "Webhook returned HTTP 502");
    }
}
