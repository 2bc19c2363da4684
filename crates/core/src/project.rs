//! Project records, drafts, and the text-editing rules for list fields.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{DbId, Timestamp};
use crate::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A decoded project as served to the public site and the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub details: String,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    /// Set only from a completed asset upload.
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A stored row whose encoded list field could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub id: DbId,
    pub field: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The editable fields of a project, as submitted by the dashboard.
///
/// Used for both create and edit; an edit replaces every field wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProjectDraft {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Details must be at most 10000 characters"))]
    pub details: String,
    #[serde(default)]
    #[validate(custom(function = no_commas, message = "Tags must not contain commas"))]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = single_lines, message = "Features must be one line each"))]
    pub features: Vec<String>,
    #[serde(default)]
    #[validate(url(message = "GitHub URL must be a valid URL"))]
    pub github_url: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Live URL must be a valid URL"))]
    pub live_url: Option<String>,
}

impl ProjectDraft {
    /// Trim text, drop empty list elements, and turn blank URLs into `None`.
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            details: self.details.trim().to_string(),
            tags: clean_items(self.tags.iter().map(String::as_str)),
            features: clean_items(self.features.iter().map(String::as_str)),
            github_url: blank_to_none(self.github_url.as_deref()),
            live_url: blank_to_none(self.live_url.as_deref()),
        }
    }

    /// Validate the normalized draft.
    pub fn check(&self) -> FieldErrors {
        match self.normalized().validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors.into(),
        }
    }
}

/// Tags are edited as comma-separated text, so an element may not hold one.
fn no_commas(tags: &[String]) -> Result<(), ValidationError> {
    if tags.iter().any(|tag| tag.contains(',')) {
        return Err(ValidationError::new("separator"));
    }
    Ok(())
}

/// Features are edited one per line.
fn single_lines(features: &[String]) -> Result<(), ValidationError> {
    if features.iter().any(|f| f.contains(['\n', '\r'])) {
        return Err(ValidationError::new("separator"));
    }
    Ok(())
}

fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn clean_items<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Text editing
// ---------------------------------------------------------------------------

/// Parse comma-separated tag text. Elements are trimmed; empty ones dropped.
///
/// ```
/// use folio_core::project::parse_tags;
/// assert_eq!(parse_tags("react, node, "), vec!["react", "node"]);
/// ```
pub fn parse_tags(text: &str) -> Vec<String> {
    clean_items(text.split(','))
}

/// Parse newline-separated feature text. Lines are trimmed; blank lines are
/// dropped.
pub fn parse_features(text: &str) -> Vec<String> {
    clean_items(text.lines())
}

/// Render tags back into the comma-separated editing form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Render features back into the one-per-line editing form.
pub fn join_features(features: &[String]) -> String {
    features.join("\n")
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Whether `record` matches `query` (case-insensitive substring on title,
/// description, or any tag). An empty query matches everything.
pub fn matches_query(record: &ProjectRecord, query: &str) -> bool {
    let needle = query.to_lowercase();
    record.title.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Records matching `query`, in their original order.
pub fn filter_projects<'a>(records: &'a [ProjectRecord], query: &str) -> Vec<&'a ProjectRecord> {
    records
        .iter()
        .filter(|record| matches_query(record, query))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
