//! Tests for the in-memory contact sink.

use assert_matches::assert_matches;
use folio_core::contact::ContactMessage;
use folio_relay::memory::MemorySink;
use folio_relay::{ContactSink, RelayError};

fn message() -> ContactMessage {
    ContactMessage {
        name: "  Grace ".into(),
        email: "grace@example.com".into(),
        subject: "Compilers".into(),
        message: "Let us talk about compilers.".into(),
    }
}

#[tokio::test]
async fn stores_normalized_messages_in_order() {
    let sink = MemorySink::new();
    sink.deliver(&message()).await.unwrap();
    sink.deliver(&ContactMessage {
        subject: "Second".into(),
        ..message()
    })
    .await
    .unwrap();

    let stored = sink.messages().await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, "Grace");
    assert_eq!(stored[1].subject, "Second");
}

#[tokio::test]
async fn offline_sink_fails_without_storing() {
    let sink = MemorySink::new();
    sink.set_offline(true);
    assert_matches!(sink.deliver(&message()).await, Err(RelayError::Unavailable(_)));
    assert!(sink.messages().await.is_empty());
}
