//! Shared response envelope types for API handlers.
//!
//! API responses use a `{ "data": ... }` envelope. The contact relay endpoint
//! is the exception: it keeps its own `{ message, success }` contract.

use folio_core::project::{IntegrityIssue, ProjectRecord};
use folio_core::validation::FieldErrors;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Project listing: decodable records plus rows that could not be decoded.
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub data: Vec<ProjectRecord>,
    pub integrity_errors: Vec<IntegrityIssue>,
}

/// Body of every `/api/contactus` response.
#[derive(Debug, Serialize)]
pub struct RelayReply {
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl RelayReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            errors: None,
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            message: "Please correct the highlighted fields".into(),
            success: false,
            errors: Some(errors),
        }
    }
}
