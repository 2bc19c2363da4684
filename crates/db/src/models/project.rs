//! Project row model and DTOs.
//!
//! `tags` and `features` are kept in their encoded text form at this layer;
//! [`ProjectRow::decode`] turns a row into a [`ProjectRecord`].

use folio_core::codec::{decode_optional_list, encode_list};
use folio_core::project::{IntegrityIssue, ProjectDraft, ProjectRecord};
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub details: String,
    pub tags: Option<String>,
    pub features: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectRow {
    /// Decode the encoded list columns.
    ///
    /// The first column that fails to decode is reported as an
    /// [`IntegrityIssue`] carrying the row id.
    pub fn decode(self) -> Result<ProjectRecord, IntegrityIssue> {
        let issue = |field: &str, err: folio_core::error::CoreError| IntegrityIssue {
            id: self.id,
            field: field.to_string(),
            message: err.to_string(),
        };
        let tags = decode_optional_list(self.tags.as_deref()).map_err(|e| issue("tags", e))?;
        let features =
            decode_optional_list(self.features.as_deref()).map_err(|e| issue("features", e))?;

        Ok(ProjectRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            details: self.details,
            tags,
            features,
            github_url: self.github_url,
            live_url: self.live_url,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DTO for inserting a new project. The store assigns the id.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub details: String,
    /// Encoded list text.
    pub tags: String,
    /// Encoded list text.
    pub features: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
}

impl CreateProject {
    /// Build from a draft (normalized here) and an optional uploaded image URL.
    pub fn from_draft(draft: &ProjectDraft, image_url: Option<String>) -> Self {
        let draft = draft.normalized();
        Self {
            tags: encode_list(&draft.tags),
            features: encode_list(&draft.features),
            title: draft.title,
            description: draft.description,
            details: draft.details,
            github_url: draft.github_url,
            live_url: draft.live_url,
            image_url,
        }
    }
}

/// DTO for replacing a project in place.
///
/// Every editable field is overwritten. `image_url` is only overwritten when
/// `Some`; `None` keeps the stored image.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub title: String,
    pub description: String,
    pub details: String,
    pub tags: String,
    pub features: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateProject {
    pub fn from_draft(draft: &ProjectDraft, image_url: Option<String>) -> Self {
        let CreateProject {
            title,
            description,
            details,
            tags,
            features,
            github_url,
            live_url,
            image_url,
        } = CreateProject::from_draft(draft, image_url);
        Self {
            title,
            description,
            details,
            tags,
            features,
            github_url,
            live_url,
            image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(tags: Option<&str>, features: Option<&str>) -> ProjectRow {
        let now = Utc::now();
        ProjectRow {
            id: 7,
            title: "Site".into(),
            description: String::new(),
            details: String::new(),
            tags: tags.map(str::to_string),
            features: features.map(str::to_string),
            github_url: None,
            live_url: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn decode_restores_lists() {
        let record = row(Some(r#"["a","b"]"#), None).decode().unwrap();
        assert_eq!(record.tags, vec!["a", "b"]);
        assert!(record.features.is_empty());
    }

    #[test]
    fn decode_reports_bad_column() {
        let issue = row(Some("[]"), Some("Fast, Secure")).decode().unwrap_err();
        assert_eq!(issue.id, 7);
        assert_eq!(issue.field, "features");
    }

    #[test]
    fn create_dto_encodes_normalized_draft() {
        let draft = ProjectDraft {
            title: " Site ".into(),
            tags: vec!["react".into(), " ".into()],
            github_url: Some(String::new()),
            ..Default::default()
        };
        let dto = CreateProject::from_draft(&draft, Some("https://cdn/x.png".into()));
        assert_eq!(dto.title, "Site");
        assert_eq!(dto.tags, r#"["react"]"#);
        assert_eq!(dto.features, "[]");
        assert_eq!(dto.github_url, None);
        assert_eq!(dto.image_url.as_deref(), Some("https://cdn/x.png"));
    }
}
