//! Contact message row model and DTO.

use folio_core::contact::ContactMessage;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessageRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// DTO for appending a contact message.
#[derive(Debug, Clone)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<&ContactMessage> for CreateContactMessage {
    fn from(msg: &ContactMessage) -> Self {
        let msg = msg.normalized();
        Self {
            name: msg.name,
            email: msg.email,
            subject: msg.subject,
            message: msg.message,
        }
    }
}
