//! End-to-end store tests over a temporary data directory.
//!
//! Exercises the full caller flow for every storage kind: identity assigned
//! at the boundary, CRUD through the store, state surviving a reopen.

use serde_json::{json, Value};
use tempfile::TempDir;

use flatstore::{api, FileBackend, Record, RecordStore, StorageKind, StoreError, UUID_FIELD};

fn record(value: Value) -> Record {
    value.as_object().unwrap().clone()
}

fn open(dir: &TempDir, kind: StorageKind) -> RecordStore {
    RecordStore::new(FileBackend::new(dir.path(), "data", kind))
}

#[test]
fn test_full_crud_flow_every_storage_kind() {
    for kind in StorageKind::all() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir, *kind);

        store.create_table("people").unwrap();

        // Boundary assigns identity, store persists as given.
        let mut alice = record(json!({"name": "Alice", "age": 34}));
        let alice_id = api::assign_record_id(&mut alice);
        store.insert_record("people", alice.clone()).unwrap();

        let mut bob = record(json!({"name": "Bob"}));
        let bob_id = api::assign_record_id(&mut bob);
        store.insert_record("people", bob).unwrap();
        assert_ne!(alice_id, bob_id);

        let found = store.record_by_id("people", &alice_id).unwrap().unwrap();
        assert_eq!(found, alice);

        store
            .update_record("people", &bob_id, record(json!({"age": 28})))
            .unwrap();
        let bob = store.record_by_id("people", &bob_id).unwrap().unwrap();
        assert_eq!(bob["age"], json!(28));
        assert_eq!(bob["name"], json!("Bob"));
        assert_eq!(bob[UUID_FIELD], json!(bob_id.clone()));

        store.delete_record("people", &alice_id).unwrap();
        assert_eq!(store.record_by_id("people", &alice_id).unwrap(), None);
        assert_eq!(store.all_records("people", None, None).unwrap().len(), 1);

        store.delete_table("people").unwrap();
        assert!(matches!(
            store.all_records("people", None, None),
            Err(StoreError::TableNotFound { .. })
        ));
    }
}

#[test]
fn test_state_survives_reopen() {
    for kind in StorageKind::all() {
        let dir = TempDir::new().unwrap();
        let id = {
            let store = open(&dir, *kind);
            store.create_table("notes").unwrap();
            let mut note = record(json!({"body": "remember the milk"}));
            let id = api::assign_record_id(&mut note);
            store.insert_record("notes", note).unwrap();
            id
        };

        let store = open(&dir, *kind);
        let note = store.record_by_id("notes", &id).unwrap().unwrap();
        assert_eq!(note["body"], json!("remember the milk"), "{kind}");
    }
}

#[test]
fn test_storage_kinds_use_separate_files() {
    let dir = TempDir::new().unwrap();

    let json_store = open(&dir, StorageKind::Json);
    let yaml_store = open(&dir, StorageKind::Yaml);

    json_store.create_table("only_in_json").unwrap();

    // Same store name, different codec: different file, independent state.
    assert_ne!(json_store.path(), yaml_store.path());
    assert!(!yaml_store.table_exists("only_in_json").unwrap());
    assert!(matches!(
        yaml_store.create_table("only_in_json"),
        Ok(())
    ));
}

#[test]
fn test_pagination_across_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir, StorageKind::Binary);
        store.create_table("seq").unwrap();
        for name in ["A", "B", "C"] {
            let mut rec = record(json!({"name": name}));
            api::assign_record_id(&mut rec);
            store.insert_record("seq", rec).unwrap();
        }
    }

    let store = open(&dir, StorageKind::Binary);
    let page = store.all_records("seq", Some(1), Some(1)).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], json!("B"));
}

#[test]
fn test_json_store_file_is_human_diffable() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, StorageKind::Json);
    store.create_table("t").unwrap();

    let text = std::fs::read_to_string(store.path()).unwrap();
    assert!(text.contains('\n'));
    assert!(text.trim_start().starts_with('{'));
}

/// Documents the accepted risk of non-atomic writes: a store file truncated
/// mid-write fails loudly on the next read instead of losing data silently.
#[test]
fn test_corrupted_store_fails_loudly_on_every_operation() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, StorageKind::Json);
    store.create_table("t").unwrap();

    std::fs::write(store.path(), "{\"t\": [").unwrap();

    assert!(matches!(
        store.all_records("t", None, None),
        Err(StoreError::Decode { .. })
    ));
    assert!(matches!(
        store.create_table("u"),
        Err(StoreError::Decode { .. })
    ));
}
