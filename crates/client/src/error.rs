/// Shown when a failed response carries no usable message.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// Errors from the folio HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The server answered with a non-2xx status, or a 2xx relay reply
    /// with `success: false`.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Text suitable for a toast or banner.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::Encode(_) => None,
        }
    }
}

/// Pull a human-readable message out of an error body: the JSON `message` or
/// `error` field, else empty.
pub(crate) fn message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_default()
}
