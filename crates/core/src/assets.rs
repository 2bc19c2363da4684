//! Project image uploads: accepted formats, size limit, and object naming.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Object-key prefix for project images.
pub const PROJECT_IMAGE_PREFIX: &str = "projects";

/// Default upload size limit (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted file extensions (lowercase).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

// ---------------------------------------------------------------------------
// Upload payload
// ---------------------------------------------------------------------------

/// An image file chosen in the dashboard, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    /// Original file name as picked by the user.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Check extension, size, and content; returns the MIME type to store.
    pub fn inspect(&self, max_bytes: usize) -> Result<&'static str, CoreError> {
        let ext = image_extension(&self.file_name)?;
        if self.bytes.is_empty() {
            return Err(CoreError::Validation("Image file is empty".into()));
        }
        if self.bytes.len() > max_bytes {
            return Err(CoreError::Validation(format!(
                "Image exceeds the {max_bytes} byte upload limit"
            )));
        }
        let sniffed = sniff_image_mime(&self.bytes)?;
        if sniffed != content_type_for(&ext) {
            return Err(CoreError::Validation(format!(
                "Image content ({sniffed}) does not match the .{ext} extension"
            )));
        }
        Ok(sniffed)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lowercased extension of `file_name` if it is an accepted image type.
pub fn image_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// MIME type for an accepted extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Identify the image format from its magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Result<&'static str, CoreError> {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => Ok("image/png"),
        Ok(image::ImageFormat::Jpeg) => Ok("image/jpeg"),
        Ok(image::ImageFormat::WebP) => Ok("image/webp"),
        Ok(other) => Err(CoreError::Validation(format!(
            "Unsupported image content: {other:?}"
        ))),
        Err(_) => Err(CoreError::Validation(
            "File content is not a recognised image".into(),
        )),
    }
}

/// Fresh object path for an upload:
/// `<prefix>/<unix-millis>-<uuid>.<ext>`.
///
/// The random component keeps two uploads in the same millisecond apart.
pub fn asset_object_path(
    prefix: &str,
    file_name: &str,
    now: Timestamp,
) -> Result<String, CoreError> {
    let ext = image_extension(file_name)?;
    Ok(format!(
        "{}/{}-{}.{ext}",
        prefix.trim_matches('/'),
        now.timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
