//! Repository for the `contact_messages` table.

use sqlx::PgPool;

use crate::models::contact_message::{ContactMessageRow, CreateContactMessage};

const COLUMNS: &str = "id, name, email, subject, message, created_at";

/// Append-only access to relayed contact messages.
pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Append one message, returning the stored row.
    pub async fn append(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessageRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessageRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }
}
