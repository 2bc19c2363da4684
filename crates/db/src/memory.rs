//! In-process [`ProjectStore`] used by integration tests and local demos.
//!
//! Behaves like the PostgreSQL store: ids are assigned on insert, listing is
//! newest first, updates keep the stored image when none is supplied. Rows
//! can be injected raw to exercise integrity handling, and the store can be
//! switched offline to exercise failure paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use folio_core::types::DbId;
use tokio::sync::Mutex;

use crate::models::project::{CreateProject, ProjectRow, UpdateProject};
use crate::store::{ProjectStore, StoreError};

#[derive(Default)]
struct Inner {
    rows: Vec<ProjectRow>,
    next_id: DbId,
}

#[derive(Default)]
pub struct MemoryProjectStore {
    inner: Mutex<Inner>,
    offline: AtomicBool,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Insert a row exactly as given (encoded columns untouched), assigning an id.
    pub async fn insert_raw(&self, mut row: ProjectRow) -> DbId {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        row.id = inner.next_id;
        let id = row.id;
        inner.rows.push(row);
        id
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store is offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    async fn list(&self) -> Result<Vec<ProjectRow>, StoreError> {
        self.check_online()?;
        let inner = self.inner.lock().await;
        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ProjectRow>, StoreError> {
        self.check_online()?;
        let inner = self.inner.lock().await;
        Ok(inner.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, input: &CreateProject) -> Result<ProjectRow, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let now = Utc::now();
        let row = ProjectRow {
            id: inner.next_id,
            title: input.title.clone(),
            description: input.description.clone(),
            details: input.details.clone(),
            tags: Some(input.tags.clone()),
            features: Some(input.features.clone()),
            github_url: input.github_url.clone(),
            live_url: input.live_url.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<ProjectRow>, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.lock().await;
        let Some(row) = inner.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        row.title = input.title.clone();
        row.description = input.description.clone();
        row.details = input.details.clone();
        row.tags = Some(input.tags.clone());
        row.features = Some(input.features.clone());
        row.github_url = input.github_url.clone();
        row.live_url = input.live_url.clone();
        if let Some(url) = &input.image_url {
            row.image_url = Some(url.clone());
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.lock().await;
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok(inner.rows.len() < before)
    }
}
