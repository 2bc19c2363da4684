//! Handlers for the `/projects` resource.
//!
//! Reads are public. Writes require an [`AdminSession`] and take a multipart
//! body: a `project` part holding the JSON draft and an optional `image` part.
//! The image is uploaded before the row is written so a record never points at
//! an object that does not exist. Images are removed again when the write
//! fails, when an edit replaces them, and when their record is deleted.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use folio_core::assets::{asset_object_path, ImageUpload, PROJECT_IMAGE_PREFIX};
use folio_core::error::CoreError;
use folio_core::project::{filter_projects, ProjectDraft, ProjectRecord};
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, ProjectRow, UpdateProject};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::query::ProjectQuery;
use crate::response::{DataResponse, ProjectListResponse};
use crate::state::AppState;

const ENTITY: &str = "Project";

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// Newest first. Rows whose list columns fail to decode are left out of
/// `data` and reported in `integrity_errors`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectQuery>,
) -> AppResult<Json<ProjectListResponse>> {
    let rows = state.projects.list().await?;

    let mut records = Vec::with_capacity(rows.len());
    let mut integrity_errors = Vec::new();
    for row in rows {
        match row.decode() {
            Ok(record) => records.push(record),
            Err(issue) => {
                tracing::warn!(
                    id = issue.id,
                    field = %issue.field,
                    error = %issue.message,
                    "Skipping project with undecodable field"
                );
                integrity_errors.push(issue);
            }
        }
    }

    let data = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => filter_projects(&records, q).into_iter().cloned().collect(),
        _ => records,
    };

    Ok(Json(ProjectListResponse {
        data,
        integrity_errors,
    }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectRecord>>> {
    let row = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    Ok(Json(DataResponse { data: decode(row)? }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
pub async fn create(
    session: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectRecord>>)> {
    let (draft, image) = read_submission(multipart).await?;
    let draft = checked(draft)?;
    let stored = store_image(&state, image).await?;
    let image_url = stored.as_ref().map(|s| s.url.clone());

    let row = match state
        .projects
        .insert(&CreateProject::from_draft(&draft, image_url))
        .await
    {
        Ok(row) => row,
        Err(e) => {
            discard_image(&state, stored.map(|s| s.path)).await;
            return Err(e.into());
        }
    };
    tracing::info!(id = row.id, admin = %session.email, "Project created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: decode(row)? })))
}

/// PUT /api/v1/projects/{id}
///
/// Replaces every editable field. The stored image is kept unless a new one
/// is uploaded.
pub async fn update(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<ProjectRecord>>> {
    let (draft, image) = read_submission(multipart).await?;
    let draft = checked(draft)?;

    // Fail before uploading anything for a record that is already gone.
    let previous = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    let stored = store_image(&state, image).await?;
    let image_url = stored.as_ref().map(|s| s.url.clone());

    let row = match state
        .projects
        .update(id, &UpdateProject::from_draft(&draft, image_url))
        .await
    {
        Ok(Some(row)) => row,
        Ok(None) => {
            discard_image(&state, stored.map(|s| s.path)).await;
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }
        Err(e) => {
            discard_image(&state, stored.map(|s| s.path)).await;
            return Err(e.into());
        }
    };
    tracing::info!(id, admin = %session.email, "Project updated");

    if stored.is_some() && previous.image_url != row.image_url {
        discard_image(&state, own_path(&state, previous.image_url.as_deref())).await;
    }

    Ok(Json(DataResponse { data: decode(row)? }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let row = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

    if !state.projects.delete(id).await? {
        return Err(CoreError::NotFound { entity: ENTITY, id }.into());
    }
    tracing::info!(id, admin = %session.email, "Project deleted");

    discard_image(&state, own_path(&state, row.image_url.as_deref())).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn decode(row: ProjectRow) -> AppResult<ProjectRecord> {
    row.decode().map_err(|issue| {
        CoreError::DataIntegrity(format!(
            "project {} has an undecodable '{}' field: {}",
            issue.id, issue.field, issue.message
        ))
        .into()
    })
}

fn checked(draft: ProjectDraft) -> AppResult<ProjectDraft> {
    let errors = draft.check();
    if errors.is_empty() {
        Ok(draft)
    } else {
        Err(CoreError::InvalidFields(errors).into())
    }
}

/// Parse the multipart body into a draft and an optional image.
///
/// An `image` part with no file name and no bytes counts as "no image".
async fn read_submission(
    mut multipart: Multipart,
) -> AppResult<(ProjectDraft, Option<ImageUpload>)> {
    let mut draft: Option<ProjectDraft> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "project" => {
                let text = field.text().await?;
                let parsed = serde_json::from_str(&text).map_err(|e| {
                    AppError::BadRequest(format!("Invalid 'project' JSON: {e}"))
                })?;
                draft = Some(parsed);
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await?;
                if !(file_name.is_empty() && data.is_empty()) {
                    image = Some(ImageUpload::new(file_name, data.to_vec()));
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let draft =
        draft.ok_or_else(|| AppError::BadRequest("Missing required 'project' field".into()))?;
    Ok((draft, image))
}

/// An uploaded image: where it lives in the asset store and where it is served.
struct StoredImage {
    path: String,
    url: String,
}

/// Upload `image` (if any) under a fresh path.
async fn store_image(
    state: &AppState,
    image: Option<ImageUpload>,
) -> AppResult<Option<StoredImage>> {
    let Some(image) = image else {
        return Ok(None);
    };

    let content_type = image.inspect(state.config.max_upload_bytes)?;
    let path = asset_object_path(PROJECT_IMAGE_PREFIX, &image.file_name, Utc::now())?;
    let size = image.bytes.len();

    let url = state
        .assets
        .upload(&path, image.bytes, content_type, false)
        .await?;
    tracing::info!(%path, size, content_type, "Project image uploaded");

    Ok(Some(StoredImage { path, url }))
}

/// The asset path behind `url`, when it points into this deployment's store.
fn own_path(state: &AppState, url: Option<&str>) -> Option<String> {
    url.and_then(|url| state.assets.path_for_url(url))
}

/// Best-effort removal of an image nothing references any more.
async fn discard_image(state: &AppState, path: Option<String>) {
    let Some(path) = path else {
        return;
    };
    match state.assets.delete(&path).await {
        Ok(()) => tracing::info!(%path, "Project image removed"),
        Err(e) => tracing::warn!(%path, error = %e, "Failed to remove project image"),
    }
}
