//! Integration tests for the prefix-namespaced key-value store over both media.

mod common;

use docsense::adapters::sqlite::{initialize_database, PoolConfig, SqliteMedium};
use docsense::adapters::storage::InMemoryMedium;
use docsense::{DomainError, KeyValueMedium, KeyValueStore, SessionRecord, StoredValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Bookmark {
    url: String,
    visits: u32,
}

impl StoredValue for Bookmark {
    const SCHEMA: &'static str = "bookmark";
    const VERSION: u32 = 1;
}

fn bookmark(url: &str, visits: u32) -> Bookmark {
    Bookmark {
        url: url.to_string(),
        visits,
    }
}

async fn exercise_last_write_wins<M: KeyValueMedium>(medium: Arc<M>) {
    let store = KeyValueStore::new(medium, "bookmarks");

    store.set_item("home", &bookmark("https://a.example", 1)).await.unwrap();
    store.set_item("docs", &bookmark("https://b.example", 1)).await.unwrap();
    store.set_item("home", &bookmark("https://a.example", 2)).await.unwrap();

    assert_eq!(
        store.get_item::<Bookmark>("home").await.unwrap(),
        Some(bookmark("https://a.example", 2))
    );
    assert_eq!(
        store.get_item::<Bookmark>("docs").await.unwrap(),
        Some(bookmark("https://b.example", 1))
    );
    assert_eq!(store.get_item::<Bookmark>("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_last_write_wins_in_memory() {
    exercise_last_write_wins(Arc::new(InMemoryMedium::new())).await;
}

#[tokio::test]
async fn test_last_write_wins_sqlite() {
    let (_dir, db_path) = common::temp_db_path();
    let pool = initialize_database(&db_path, &PoolConfig::default())
        .await
        .expect("Failed to initialize database");

    exercise_last_write_wins(Arc::new(SqliteMedium::new(pool))).await;
}

#[tokio::test]
async fn test_get_all_items_excludes_other_namespaces() {
    let medium = Arc::new(InMemoryMedium::new());
    let sessions = KeyValueStore::new(Arc::clone(&medium), "ocr-sessions");
    let bookmarks = KeyValueStore::new(Arc::clone(&medium), "bookmarks");
    let prefixed = KeyValueStore::new(Arc::clone(&medium), "ocr");

    let record = SessionRecord::new("Summary", "memory://img");
    sessions.set_item(&record.id, &record).await.unwrap();
    bookmarks.set_item("one", &bookmark("https://c.example", 3)).await.unwrap();
    // Unrelated raw key sharing the medium
    medium.set("theme", "dark").await.unwrap();

    assert_eq!(
        sessions.get_all_items::<SessionRecord>().await.unwrap(),
        vec![record.clone()]
    );
    assert_eq!(
        bookmarks.get_all_items::<Bookmark>().await.unwrap(),
        vec![bookmark("https://c.example", 3)]
    );
    // "ocr-sessions-<id>" starts with "ocr-" but belongs to another namespace
    assert!(prefixed.get_all_items::<SessionRecord>().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_absent_key_leaves_store_unchanged() {
    let medium = Arc::new(InMemoryMedium::new());
    let store = KeyValueStore::new(Arc::clone(&medium), "bookmarks");
    store.set_item("a", &bookmark("https://a.example", 1)).await.unwrap();
    let before = medium.len().await;

    store.remove_item("never-written").await.unwrap();

    assert_eq!(medium.len().await, before);
    assert_eq!(store.get_all_items::<Bookmark>().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_corrupt_entry_does_not_break_enumeration() {
    let medium = Arc::new(InMemoryMedium::new());
    let store = KeyValueStore::new(Arc::clone(&medium), "bookmarks");
    store.set_item("ok", &bookmark("https://ok.example", 1)).await.unwrap();
    medium.set("bookmarks-broken", "{\"schema\":").await.unwrap();

    assert_eq!(store.get_item::<Bookmark>("broken").await.unwrap(), None);
    assert_eq!(
        store.get_all_items::<Bookmark>().await.unwrap(),
        vec![bookmark("https://ok.example", 1)]
    );
}

#[tokio::test]
async fn test_reading_with_wrong_type_is_not_found() {
    let store = KeyValueStore::new(Arc::new(InMemoryMedium::new()), "mixed");
    store.set_item("b", &bookmark("https://b.example", 1)).await.unwrap();

    assert_eq!(store.get_item::<SessionRecord>("b").await.unwrap(), None);
    assert!(store.get_all_items::<SessionRecord>().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_quota_rejection_surfaces_as_storage_error() {
    let store = KeyValueStore::new(Arc::new(InMemoryMedium::with_quota(64)), "bookmarks");

    let err = store
        .set_item("big", &bookmark(&"x".repeat(128), 1))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Storage(_)));
    assert_eq!(store.get_item::<Bookmark>("big").await.unwrap(), None);
}
