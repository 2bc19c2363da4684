//! Append-only table sink.

use async_trait::async_trait;
use folio_core::contact::ContactMessage;
use folio_db::models::contact_message::CreateContactMessage;
use folio_db::repositories::ContactMessageRepo;
use folio_db::DbPool;

use crate::{ContactSink, RelayError};

/// Appends each message as a row of `contact_messages`.
pub struct TableSink {
    pool: DbPool,
}

impl TableSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactSink for TableSink {
    fn name(&self) -> &'static str {
        "table"
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError> {
        let row = ContactMessageRepo::append(&self.pool, &CreateContactMessage::from(message)).await?;
        tracing::debug!(row_id = row.id, "Contact message appended");
        Ok(())
    }
}
