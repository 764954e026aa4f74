use std::collections::BTreeMap;

use serde_json::json;
use tempfile::TempDir;

use courier::{
    CollectionTarget, ExecutionResult, FileStore, HttpMethod, SnapshotStore, SuccessResponse,
    TabPatch, Workspace, WorkspaceStore,
};

#[test]
fn round_trip_through_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workspace.json");

    let mut store = WorkspaceStore::new(Box::new(FileStore::new(&path)));
    let tab_id = store.workspace().tabs[0].id.clone();
    store.set_base_url("https://api.test");
    store
        .update_tab(
            &tab_id,
            TabPatch {
                method: Some(HttpMethod::Post),
                url: Some("/users".into()),
                ..Default::default()
            },
        )
        .unwrap();
    store
        .save_to_collection(&tab_id, CollectionTarget::Named("Smoke".into()))
        .unwrap();
    store.toggle_theme();
    store.finish_execution(
        &tab_id,
        ExecutionResult::Success(SuccessResponse {
            status: 201,
            status_text: "Created".into(),
            headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            data: json!({"id": 7}),
            time_ms: 12,
            size_bytes: 8,
        }),
    );
    let expected = store.workspace().clone();
    drop(store);

    let restored = WorkspaceStore::new(Box::new(FileStore::new(&path)));
    assert_eq!(restored.workspace(), &expected);
}

#[test]
fn absent_snapshot_seeds_defaults() {
    let dir = TempDir::new().unwrap();
    let store = WorkspaceStore::new(Box::new(FileStore::new(dir.path().join("missing.json"))));

    let ws = store.workspace();
    assert_eq!(ws.tabs.len(), 1);
    assert_eq!(ws.environments.len(), 2);
    assert_eq!(ws.environments[0].name, "Development");
    assert_eq!(ws.environments[1].name, "Production");
    assert!(ws.is_consistent());
}

#[test]
fn corrupt_snapshot_is_treated_as_absent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workspace.json");
    std::fs::write(&path, "definitely { not json").unwrap();

    let adapter = FileStore::new(&path);
    assert!(adapter.load().is_none());

    let store = WorkspaceStore::new(Box::new(FileStore::new(&path)));
    assert!(store.workspace().is_consistent());
}

#[test]
fn inconsistent_snapshot_is_discarded_on_restore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workspace.json");

    let mut broken = Workspace::seeded();
    broken.active_tab_id = "dangling".into();
    FileStore::new(&path).save(&broken);

    let store = WorkspaceStore::new(Box::new(FileStore::new(&path)));
    assert!(store.workspace().is_consistent());
    assert_ne!(store.workspace().active_tab_id, "dangling");
}

#[test]
fn clear_removes_the_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workspace.json");

    let adapter = FileStore::new(&path);
    adapter.save(&Workspace::seeded());
    assert!(adapter.load().is_some());

    adapter.clear();
    assert!(adapter.load().is_none());
    // Clearing an already-absent snapshot stays quiet.
    adapter.clear();
}

#[test]
fn save_is_best_effort_and_never_panics() {
    // A directory path cannot be written as a file; save must swallow the error.
    let dir = TempDir::new().unwrap();
    let adapter = FileStore::new(dir.path());
    adapter.save(&Workspace::seeded());
    assert!(adapter.load().is_none());
}
