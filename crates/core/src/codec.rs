//! Encoded array fields.
//!
//! `tags` and `features` are stored as text holding a JSON array of strings.
//! [`encode_list`] and [`decode_list`] are the only two places that know the
//! representation.

use crate::error::CoreError;

/// Encode an ordered list of strings into its stored text form.
pub fn encode_list(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}

/// Decode stored text back into an ordered list of strings.
///
/// Anything other than a JSON array of strings is a
/// [`CoreError::DataIntegrity`] error.
pub fn decode_list(raw: &str) -> Result<Vec<String>, CoreError> {
    serde_json::from_str::<Vec<String>>(raw)
        .map_err(|e| CoreError::DataIntegrity(format!("malformed encoded list: {e}")))
}

/// Like [`decode_list`], treating a missing (NULL) column as an empty list.
pub fn decode_optional_list(raw: Option<&str>) -> Result<Vec<String>, CoreError> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => decode_list(raw),
    }
}
