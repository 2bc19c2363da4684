//! Contact message rules: field validation and the submission cooldown.
//!
//! Both the relay endpoint and the client form use [`validate_contact`], so a
//! message the form accepts is never rejected by the server for shape.
//! [`can_submit`] is a client-side courtesy guard only; the server does not
//! rely on it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Timestamp;
use crate::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum time between two successful submissions from one client.
pub const COOLDOWN_MS: i64 = 60_000;

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_SUBJECT: &str = "subject";
pub const FIELD_MESSAGE: &str = "message";

/// All contact fields in display order.
pub const CONTACT_FIELDS: [&str; 4] = [FIELD_NAME, FIELD_EMAIL, FIELD_SUBJECT, FIELD_MESSAGE];

/// Simplified `local@domain.tld` shape.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A contact message as typed into the public form.
///
/// Lengths are counted in characters on the trimmed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactMessage {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    #[validate(regex(path = *EMAIL_PATTERN, message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(
        min = 3,
        max = 100,
        message = "Subject must be between 3 and 100 characters"
    ))]
    pub subject: String,
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Message must be between 10 and 1000 characters"
    ))]
    pub message: String,
}

impl ContactMessage {
    /// Copy of the message with every field trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Current value of a field by name.
    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            FIELD_NAME => Some(&self.name),
            FIELD_EMAIL => Some(&self.email),
            FIELD_SUBJECT => Some(&self.subject),
            FIELD_MESSAGE => Some(&self.message),
            _ => None,
        }
    }

    /// Mutable access to a field by name. Unknown names yield `None`.
    pub fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            FIELD_NAME => Some(&mut self.name),
            FIELD_EMAIL => Some(&mut self.email),
            FIELD_SUBJECT => Some(&mut self.subject),
            FIELD_MESSAGE => Some(&mut self.message),
            _ => None,
        }
    }

    /// Names of fields that are empty after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        CONTACT_FIELDS
            .into_iter()
            .filter(|f| self.field(f).map_or(true, |v| v.trim().is_empty()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a contact message. Pure: no clock, no I/O.
///
/// Returns an empty [`FieldErrors`] when the message is acceptable.
pub fn validate_contact(message: &ContactMessage) -> FieldErrors {
    match message.normalized().validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

// ---------------------------------------------------------------------------
// Cooldown
// ---------------------------------------------------------------------------

/// Whether a new submission is allowed at `now`.
///
/// True when nothing was submitted yet or strictly more than [`COOLDOWN_MS`]
/// elapsed since the last successful submission.
pub fn can_submit(last_submission: Option<Timestamp>, now: Timestamp) -> bool {
    cooldown_remaining_ms(last_submission, now) == 0
}

/// Milliseconds left before [`can_submit`] turns true; `0` when allowed.
pub fn cooldown_remaining_ms(last_submission: Option<Timestamp>, now: Timestamp) -> i64 {
    match last_submission {
        None => 0,
        Some(last) => {
            let elapsed = (now - last).num_milliseconds();
            if elapsed > COOLDOWN_MS {
                0
            } else {
                COOLDOWN_MS - elapsed + 1
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
