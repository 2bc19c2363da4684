//! Integration tests for `ContactMessageRepo`.
//!
//! Run with `DATABASE_URL` set and `cargo test -- --ignored`.

use folio_core::contact::ContactMessage;
use folio_db::models::contact_message::CreateContactMessage;
use folio_db::repositories::ContactMessageRepo;
use sqlx::PgPool;

fn message(subject: &str) -> ContactMessage {
    ContactMessage {
        name: "  Ada Lovelace ".into(),
        email: "ada@example.com".into(),
        subject: subject.into(),
        message: "Hello there, this is a message.".into(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn append_stores_normalized_message(pool: PgPool) {
    let row = ContactMessageRepo::append(&pool, &CreateContactMessage::from(&message("Hi")))
        .await
        .unwrap();
    assert_eq!(row.name, "Ada Lovelace");
    assert_eq!(row.subject, "Hi");
}
