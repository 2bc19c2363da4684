//! In-memory sink for tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use folio_core::contact::ContactMessage;
use tokio::sync::Mutex;

use crate::{ContactSink, RelayError};

#[derive(Default)]
pub struct MemorySink {
    messages: Mutex<Vec<ContactMessage>>,
    offline: AtomicBool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn messages(&self) -> Vec<ContactMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl ContactSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RelayError::Unavailable("memory sink is offline".into()));
        }
        self.messages.lock().await.push(message.normalized());
        Ok(())
    }
}
