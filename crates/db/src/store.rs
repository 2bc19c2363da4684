//! The record-store seam used by the API.
//!
//! [`ProjectStore`] is the authoritative collection of projects: select-all,
//! find, insert, update-by-id, delete-by-id. Rows come back in their encoded
//! form; decoding is the caller's job so integrity problems surface per row.

use async_trait::async_trait;
use folio_core::types::DbId;

use crate::models::project::{CreateProject, ProjectRow, UpdateProject};
use crate::repositories::ProjectRepo;
use crate::DbPool;

/// Error type for record-store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backing store refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Authoritative project collection.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All rows, newest first.
    async fn list(&self) -> Result<Vec<ProjectRow>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<ProjectRow>, StoreError>;

    /// Insert a new row; the store assigns its id.
    async fn insert(&self, input: &CreateProject) -> Result<ProjectRow, StoreError>;

    /// Replace the row with `id` in place. `None` if it does not exist.
    async fn update(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<ProjectRow>, StoreError>;

    /// Remove the row with `id`. `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`ProjectStore`] backed by the `projects` table.
#[derive(Clone)]
pub struct PgProjectStore {
    pool: DbPool,
}

impl PgProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ProjectRow>, StoreError> {
        Ok(ProjectRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ProjectRow>, StoreError> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, input: &CreateProject) -> Result<ProjectRow, StoreError> {
        let row = ProjectRepo::create(&self.pool, input).await?;
        tracing::debug!(id = row.id, "Project row inserted");
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<ProjectRow>, StoreError> {
        let row = ProjectRepo::update(&self.pool, id, input).await?;
        tracing::debug!(id, found = row.is_some(), "Project row updated");
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let removed = ProjectRepo::delete(&self.pool, id).await?;
        tracing::debug!(id, removed, "Project row deleted");
        Ok(removed)
    }
}
