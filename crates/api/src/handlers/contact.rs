//! Handler for the public contact relay endpoint.
//!
//! Unlike the `/api/v1` handlers this endpoint always answers with
//! `{ message, success }` so the public form can show the message verbatim.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::contact::{validate_contact, ContactMessage};
use serde::Deserialize;

use crate::response::RelayReply;
use crate::state::AppState;

/// Request body for `POST /api/contactus`. Every field is required.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactRequest {
    fn into_message(self) -> ContactMessage {
        ContactMessage {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
        }
    }
}

type Reply = (StatusCode, Json<RelayReply>);

/// POST /api/contactus
///
/// Validates the message and hands it to the configured sink exactly once.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Reply {
    let Ok(Json(request)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(RelayReply::failure("Invalid request body")),
        );
    };

    let message = request.into_message();
    if !message.missing_fields().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RelayReply::failure("All fields are required")),
        );
    }

    let errors = validate_contact(&message);
    if !errors.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(RelayReply::invalid(errors)));
    }

    let message = message.normalized();
    match state.contact_sink.deliver(&message).await {
        Ok(()) => {
            tracing::info!(sink = state.contact_sink.name(), "Contact message relayed");
            (
                StatusCode::OK,
                Json(RelayReply::ok("Message sent successfully")),
            )
        }
        Err(e) => {
            tracing::error!(
                sink = state.contact_sink.name(),
                error = %e,
                "Failed to relay contact message"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayReply::failure("Internal server error")),
            )
        }
    }
}

/// Any method other than POST on `/api/contactus`.
pub async fn method_not_allowed() -> Reply {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(RelayReply::failure("Method not allowed")),
    )
}
