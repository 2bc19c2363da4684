//! Behavioural tests for `MemoryProjectStore`, the store used by the API's
//! integration tests. Mirrors the guarantees of the PostgreSQL store.

use assert_matches::assert_matches;
use folio_core::project::ProjectDraft;
use folio_db::models::project::{CreateProject, UpdateProject};
use folio_db::{MemoryProjectStore, ProjectStore, StoreError};

fn draft(title: &str, tags: &[&str]) -> ProjectDraft {
    ProjectDraft {
        title: title.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn insert_assigns_increasing_ids() {
    let store = MemoryProjectStore::new();
    let a = store
        .insert(&CreateProject::from_draft(&draft("A", &[]), None))
        .await
        .unwrap();
    let b = store
        .insert(&CreateProject::from_draft(&draft("B", &[]), None))
        .await
        .unwrap();
    assert!(b.id > a.id);
}

#[tokio::test]
async fn delete_removes_exactly_that_record() {
    let store = MemoryProjectStore::new();
    let mut ids = Vec::new();
    for title in ["One", "Two", "Three"] {
        let row = store
            .insert(&CreateProject::from_draft(&draft(title, &[]), None))
            .await
            .unwrap();
        ids.push(row.id);
    }

    assert!(store.delete(ids[1]).await.unwrap());

    let remaining: Vec<_> = store.list().await.unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.contains(&ids[0]));
    assert!(remaining.contains(&ids[2]));
    assert!(!remaining.contains(&ids[1]));

    // Second delete of the same id is a no-op.
    assert!(!store.delete(ids[1]).await.unwrap());
}

#[tokio::test]
async fn update_replaces_fields_in_place() {
    let store = MemoryProjectStore::new();
    let created = store
        .insert(&CreateProject::from_draft(
            &draft("Old", &["a"]),
            Some("https://cdn/old.png".into()),
        ))
        .await
        .unwrap();

    let updated = store
        .update(
            created.id,
            &UpdateProject::from_draft(&draft("New", &["b", "c"]), None),
        )
        .await
        .unwrap()
        .expect("row exists");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "New");
    assert_eq!(updated.tags.as_deref(), Some(r#"["b","c"]"#));
    assert_eq!(updated.image_url.as_deref(), Some("https://cdn/old.png"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn update_missing_id_returns_none() {
    let store = MemoryProjectStore::new();
    let result = store
        .update(42, &UpdateProject::from_draft(&draft("X", &[]), None))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn list_is_newest_first() {
    let store = MemoryProjectStore::new();
    for title in ["First", "Second"] {
        store
            .insert(&CreateProject::from_draft(&draft(title, &[]), None))
            .await
            .unwrap();
    }
    let titles: Vec<_> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn offline_store_fails_every_call() {
    let store = MemoryProjectStore::new();
    store.set_offline(true);
    assert_matches!(store.list().await, Err(StoreError::Unavailable(_)));
    assert_matches!(store.delete(1).await, Err(StoreError::Unavailable(_)));
    assert_matches!(store.ping().await, Err(StoreError::Unavailable(_)));
}
