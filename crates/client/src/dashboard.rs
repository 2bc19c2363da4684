//! The admin project dashboard.
//!
//! Holds the project list, the search box, and the create/edit dialog. The
//! remote store is authoritative: every successful write is followed by a
//! fresh list fetch, and a failed write leaves the list as it was.

use async_trait::async_trait;
use folio_core::assets::{ImageUpload, DEFAULT_MAX_IMAGE_BYTES};
use folio_core::project::{
    filter_projects, join_features, join_tags, parse_features, parse_tags, IntegrityIssue,
    ProjectDraft, ProjectRecord,
};
use folio_core::types::DbId;
use folio_core::validation::FieldErrors;

use crate::api::{FolioClient, ProjectList};
use crate::error::ClientError;

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Remote project operations the dashboard relies on.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list(&self) -> Result<ProjectList, ClientError>;

    async fn create(
        &self,
        draft: &ProjectDraft,
        image: Option<&ImageUpload>,
    ) -> Result<ProjectRecord, ClientError>;

    async fn update(
        &self,
        id: DbId,
        draft: &ProjectDraft,
        image: Option<&ImageUpload>,
    ) -> Result<ProjectRecord, ClientError>;

    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

#[async_trait]
impl ProjectApi for FolioClient {
    async fn list(&self) -> Result<ProjectList, ClientError> {
        self.list_projects(None).await
    }

    async fn create(
        &self,
        draft: &ProjectDraft,
        image: Option<&ImageUpload>,
    ) -> Result<ProjectRecord, ClientError> {
        self.create_project(draft, image).await
    }

    async fn update(
        &self,
        id: DbId,
        draft: &ProjectDraft,
        image: Option<&ImageUpload>,
    ) -> Result<ProjectRecord, ClientError> {
        self.update_project(id, draft, image).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.delete_project(id).await
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// The create/edit dialog, holding fields in their text-editing form.
///
/// Tags are comma-separated and features one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEditor {
    /// `Some` when editing an existing record.
    pub editing_id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub details: String,
    pub tags_text: String,
    pub features_text: String,
    pub github_url: String,
    pub live_url: String,
    /// A newly picked image, not yet uploaded.
    pub image: Option<ImageUpload>,
    /// The stored image of the record being edited.
    pub current_image_url: Option<String>,
    /// Lists as loaded, used while their text is left untouched.
    loaded_tags: Vec<String>,
    loaded_features: Vec<String>,
}

impl ProjectEditor {
    /// An empty editor for a new record.
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor pre-filled from `record`.
    pub fn for_record(record: &ProjectRecord) -> Self {
        Self {
            editing_id: Some(record.id),
            title: record.title.clone(),
            description: record.description.clone(),
            details: record.details.clone(),
            tags_text: join_tags(&record.tags),
            features_text: join_features(&record.features),
            github_url: record.github_url.clone().unwrap_or_default(),
            live_url: record.live_url.clone().unwrap_or_default(),
            image: None,
            current_image_url: record.image_url.clone(),
            loaded_tags: record.tags.clone(),
            loaded_features: record.features.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// The draft this editor would submit.
    ///
    /// A list whose text still reads as loaded is submitted as loaded rather
    /// than re-split, so an element holding its separator reaches validation.
    pub fn to_draft(&self) -> ProjectDraft {
        let tags = if self.tags_text == join_tags(&self.loaded_tags) {
            self.loaded_tags.clone()
        } else {
            parse_tags(&self.tags_text)
        };
        let features = if self.features_text == join_features(&self.loaded_features) {
            self.loaded_features.clone()
        } else {
            parse_features(&self.features_text)
        };
        ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            details: self.details.clone(),
            tags,
            features,
            github_url: Some(self.github_url.clone()),
            live_url: Some(self.live_url.clone()),
        }
        .normalized()
    }

    /// Field errors for the draft plus the picked image, if any.
    pub fn check(&self) -> FieldErrors {
        let mut errors = self.to_draft().check();
        if let Some(image) = &self.image {
            if let Err(e) = image.inspect(DEFAULT_MAX_IMAGE_BYTES) {
                errors.insert("image", e.to_string());
            }
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Why a dashboard action did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("Please correct the highlighted fields")]
    Invalid(FieldErrors),

    #[error("No project is being edited")]
    NoEditor,

    /// The remote call failed; local state is unchanged.
    #[error("{0}")]
    Failed(String),
}

/// Dashboard state over a [`ProjectApi`].
#[derive(Debug)]
pub struct Dashboard<A> {
    api: A,
    records: Vec<ProjectRecord>,
    integrity_errors: Vec<IntegrityIssue>,
    search: String,
    editor: Option<ProjectEditor>,
    field_errors: FieldErrors,
    error: Option<String>,
}

impl<A: ProjectApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            records: Vec::new(),
            integrity_errors: Vec::new(),
            search: String::new(),
            editor: None,
            field_errors: FieldErrors::new(),
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// All records from the last successful fetch, newest first.
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Stored rows the server could not decode on the last fetch.
    pub fn integrity_errors(&self) -> &[IntegrityIssue] {
        &self.integrity_errors
    }

    /// The banner message from the last failed action.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Records matching the search box.
    pub fn visible(&self) -> Vec<&ProjectRecord> {
        filter_projects(&self.records, self.search.trim())
    }

    /// Replace the local list with the store's.
    ///
    /// On failure the previous list is kept and the error is reported.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        match self.api.list().await {
            Ok(list) => {
                if !list.integrity_errors.is_empty() {
                    tracing::warn!(
                        count = list.integrity_errors.len(),
                        "Some stored projects could not be decoded"
                    );
                }
                self.records = list.data;
                self.integrity_errors = list.integrity_errors;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    // ---- editor ----

    pub fn editor(&self) -> Option<&ProjectEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut ProjectEditor> {
        self.editor.as_mut()
    }

    /// Open an empty editor for a new record.
    pub fn open_create(&mut self) {
        self.field_errors.clear();
        self.editor = Some(ProjectEditor::new());
    }

    /// Open the editor on record `id`. `false` if it is not in the list.
    pub fn open_edit(&mut self, id: DbId) -> bool {
        let Some(record) = self.records.iter().find(|r| r.id == id) else {
            return false;
        };
        self.field_errors.clear();
        self.editor = Some(ProjectEditor::for_record(record));
        true
    }

    /// Close the editor, discarding its contents.
    pub fn close_editor(&mut self) {
        self.editor = None;
        self.field_errors.clear();
    }

    /// Validate and submit the editor, then refresh from the store.
    ///
    /// On success the editor is closed. On any failure the editor keeps its
    /// contents so the user can retry.
    pub async fn save(&mut self) -> Result<ProjectRecord, DashboardError> {
        let editor = self.editor.as_ref().ok_or(DashboardError::NoEditor)?;

        let errors = editor.check();
        if !errors.is_empty() {
            self.field_errors = errors.clone();
            return Err(DashboardError::Invalid(errors));
        }
        self.field_errors.clear();

        let draft = editor.to_draft();
        let image = editor.image.as_ref();
        let outcome = match editor.editing_id {
            Some(id) => self.api.update(id, &draft, image).await,
            None => self.api.create(&draft, image).await,
        };

        let record = match outcome {
            Ok(record) => record,
            Err(e) => return Err(self.fail(e)),
        };
        tracing::info!(id = record.id, "Project saved");

        self.error = None;
        self.editor = None;
        // The save already succeeded; a failed refresh only sets the banner.
        let _ = self.refresh().await;
        Ok(record)
    }

    /// Delete record `id` remotely, then refresh from the store.
    ///
    /// A failed delete leaves the local list untouched.
    pub async fn delete(&mut self, id: DbId) -> Result<(), DashboardError> {
        if let Err(e) = self.api.delete(id).await {
            return Err(self.fail(e));
        }
        tracing::info!(id, "Project deleted");

        self.error = None;
        if self.editor.as_ref().and_then(|e| e.editing_id) == Some(id) {
            self.close_editor();
        }
        let _ = self.refresh().await;
        Ok(())
    }

    fn fail(&mut self, error: ClientError) -> DashboardError {
        tracing::warn!(error = %error, "Dashboard action failed");
        let message = error.user_message();
        self.error = Some(message.clone());
        DashboardError::Failed(message)
    }
}
