//! The public contact form.
//!
//! `Idle -> (Invalid -> Idle with errors) | (Submitting -> Idle reset | Idle
//! with data)`. Both gates (cooldown, validation) are checked before any
//! network call. Inputs are frozen while a submission is in flight.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use folio_core::contact::{can_submit, cooldown_remaining_ms, validate_contact, ContactMessage};
use folio_core::types::Timestamp;
use folio_core::validation::FieldErrors;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::api::FolioClient;
use crate::error::ClientError;

// ---------------------------------------------------------------------------
// Relay seam
// ---------------------------------------------------------------------------

/// Where the form sends validated messages.
#[async_trait]
pub trait ContactRelay: Send + Sync {
    /// Deliver `message`; `Ok` carries the relay's confirmation text.
    async fn send(&self, message: &ContactMessage) -> Result<String, ClientError>;
}

#[async_trait]
impl ContactRelay for FolioClient {
    async fn send(&self, message: &ContactMessage) -> Result<String, ClientError> {
        self.send_contact(message).await
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Please wait before sending another message")]
    RateLimited { retry_after_ms: i64 },

    #[error("Please correct the highlighted fields")]
    Invalid(FieldErrors),

    #[error("A message is already being sent")]
    Busy,

    /// The relay failed; the form keeps its values.
    #[error("{0}")]
    Failed(String),
}

/// Banner shown under the form after a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Sent(String),
    Failed(String),
}

// ---------------------------------------------------------------------------
// Cooldown watch
// ---------------------------------------------------------------------------

/// Signals when the post-submission cooldown has elapsed.
///
/// Backed by a Tokio task that is cancelled when the watch is dropped, so a
/// torn-down form never receives a stale callback.
#[derive(Debug)]
pub struct CooldownWatch {
    token: CancellationToken,
    ready: watch::Receiver<bool>,
}

impl CooldownWatch {
    /// Start a timer for `remaining`. Must be called inside a Tokio runtime.
    pub fn start(remaining: Duration) -> Self {
        let token = CancellationToken::new();
        let (tx, ready) = watch::channel(false);

        let task_token = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = task_token.cancelled() => {
                    tracing::debug!("Contact cooldown timer cancelled");
                }
                () = tokio::time::sleep(remaining) => {
                    let _ = tx.send(true);
                }
            }
        });

        Self { token, ready }
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the cooldown to end. `false` if the watch was cancelled first.
    pub async fn wait(&mut self) -> bool {
        self.ready.wait_for(|ready| *ready).await.is_ok()
    }
}

impl Drop for CooldownWatch {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// State of the public contact form.
#[derive(Debug, Default)]
pub struct ContactForm {
    values: ContactMessage,
    errors: FieldErrors,
    submitting: bool,
    last_submission: Option<Timestamp>,
    /// Successful submissions; drives the one-time thank-you banner.
    submissions: u32,
    thanks_shown: u32,
    notice: Option<Notice>,
    cooldown: Option<CooldownWatch>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &ContactMessage {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// While true, inputs and the submit control are disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    pub fn last_submission(&self) -> Option<Timestamp> {
        self.last_submission
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The running cooldown timer, if a message was sent recently.
    pub fn cooldown(&mut self) -> Option<&mut CooldownWatch> {
        self.cooldown.as_mut()
    }

    /// Edit one field and clear that field's error.
    ///
    /// Ignored (returns `false`) while submitting or for an unknown field.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        if self.submitting {
            return false;
        }
        let Some(slot) = self.values.field_mut(field) else {
            return false;
        };
        *slot = value.into();
        self.errors.clear_field(field);
        true
    }

    pub fn can_submit(&self, now: Timestamp) -> bool {
        can_submit(self.last_submission, now)
    }

    /// `true` exactly once after each successful submission.
    pub fn take_thanks(&mut self) -> bool {
        if self.thanks_shown < self.submissions {
            self.thanks_shown = self.submissions;
            true
        } else {
            false
        }
    }

    /// Run both gates and, if they pass, enter the submitting state.
    ///
    /// Returns the trimmed message to send. No state changes on
    /// [`SubmitError::Busy`] or [`SubmitError::RateLimited`]; on
    /// [`SubmitError::Invalid`] the field errors are replaced.
    pub fn begin_submit(&mut self, now: Timestamp) -> Result<ContactMessage, SubmitError> {
        if self.submitting {
            return Err(SubmitError::Busy);
        }
        if !self.can_submit(now) {
            return Err(SubmitError::RateLimited {
                retry_after_ms: cooldown_remaining_ms(self.last_submission, now),
            });
        }

        let errors = validate_contact(&self.values);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        self.errors.clear();
        self.notice = None;
        self.submitting = true;
        Ok(self.values.normalized())
    }

    /// Apply the relay's outcome and leave the submitting state.
    ///
    /// Success resets the form, records `now`, and starts the cooldown
    /// watch. Failure keeps every field for a retry.
    pub fn complete(
        &mut self,
        outcome: Result<String, ClientError>,
        now: Timestamp,
    ) -> Result<String, SubmitError> {
        self.submitting = false;
        match outcome {
            Ok(message) => {
                self.values = ContactMessage::default();
                self.errors.clear();
                self.last_submission = Some(now);
                self.submissions += 1;
                self.notice = Some(Notice::Sent(message.clone()));

                let remaining = cooldown_remaining_ms(self.last_submission, now);
                // Replacing the old watch drops it, which cancels its task.
                self.cooldown = tokio::runtime::Handle::try_current().ok().map(|_| {
                    CooldownWatch::start(Duration::from_millis(remaining.max(0) as u64))
                });
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact submission failed");
                let message = e.user_message();
                self.notice = Some(Notice::Failed(message.clone()));
                Err(SubmitError::Failed(message))
            }
        }
    }

    /// Validate, send through `relay`, and apply the outcome.
    pub async fn submit(&mut self, relay: &dyn ContactRelay) -> Result<String, SubmitError> {
        let message = self.begin_submit(Utc::now())?;
        let outcome = relay.send(&message).await;
        self.complete(outcome, Utc::now())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
