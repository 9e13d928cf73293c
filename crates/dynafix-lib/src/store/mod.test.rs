use super::*;
use serde_json::json;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonStore {
    JsonStore::open(dir.path().join("store.json")).unwrap()
}

#[test]
fn test_open_missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.collections().unwrap().is_empty());
    assert!(!store.in_transaction());
    assert!(!store.path().exists());
}

#[test]
fn test_write_outside_transaction_goes_to_disk() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .upsert("users", Some("username"), json!({"username": "alice"}))
        .unwrap();

    let reopened = store_in(&dir);
    assert_eq!(
        reopened.records("users").unwrap(),
        vec![json!({"username": "alice"})]
    );
}

#[test]
fn test_commit_persists_staged_writes() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.begin().unwrap();
    assert!(store.in_transaction());
    store.upsert("users", None, json!({"username": "bob"})).unwrap();
    assert!(!store.path().exists());
    assert_eq!(store.records("users").unwrap().len(), 1);

    store.finish(ScopeOutcome::Commit).unwrap();
    assert!(!store.in_transaction());

    let reopened = store_in(&dir);
    assert_eq!(reopened.collections().unwrap(), vec!["users"]);
}

#[test]
fn test_rollback_discards_staged_writes() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.upsert("users", None, json!({"username": "carol"})).unwrap();

    store.begin().unwrap();
    store.upsert("users", None, json!({"username": "dave"})).unwrap();
    store.upsert("groups", None, json!({"name": "admins"})).unwrap();
    store.finish(ScopeOutcome::Rollback).unwrap();

    assert_eq!(
        store.records("users").unwrap(),
        vec![json!({"username": "carol"})]
    );
    assert!(store.records("groups").unwrap().is_empty());
    assert_eq!(store_in(&dir).collections().unwrap(), vec!["users"]);
}

#[test]
fn test_upsert_replaces_by_key_field() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .upsert("users", Some("username"), json!({"username": "erin", "admin": false}))
        .unwrap();
    store
        .upsert("users", Some("username"), json!({"username": "frank"}))
        .unwrap();
    store
        .upsert("users", Some("username"), json!({"username": "erin", "admin": true}))
        .unwrap();

    assert_eq!(
        store.records("users").unwrap(),
        vec![
            json!({"username": "erin", "admin": true}),
            json!({"username": "frank"}),
        ]
    );
}

#[test]
fn test_upsert_without_key_value_appends() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.upsert("tags", Some("slug"), json!({"label": "a"})).unwrap();
    store.upsert("tags", Some("slug"), json!({"label": "a"})).unwrap();

    assert_eq!(store.records("tags").unwrap().len(), 2);
}

#[test]
fn test_nested_begin_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.begin().unwrap();
    assert!(matches!(store.begin(), Err(TransactionError::AlreadyActive)));
}

#[test]
fn test_finish_without_begin_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(matches!(
        store.finish(ScopeOutcome::Commit),
        Err(TransactionError::NotActive)
    ));
}

#[test]
fn test_invalid_json_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
    assert!(err.to_string().contains("not valid JSON"));
}

#[test]
fn test_commit_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(dir.path().join("nested/data/store.json")).unwrap();

    store.begin().unwrap();
    store.upsert("users", None, json!({"username": "gina"})).unwrap();
    store.finish(ScopeOutcome::Commit).unwrap();

    assert!(dir.path().join("nested/data/store.json").is_file());
}
