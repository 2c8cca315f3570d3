//! Tests for StateManager

use super::*;
use tempfile::tempdir;

fn sample_data() -> ResourceData {
    let mut data = ResourceData::with_id("group/app:DB_URL");
    data.set("project", "group/app");
    data.set("key", "DB_URL");
    data.set("value", "postgres://db");
    data
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_state_manager_new() {
    let manager = StateManager::new("/tmp/test-state.json");
    assert!(!manager.is_in_memory());
    assert_eq!(manager.path().to_str().unwrap(), "/tmp/test-state.json");
}

#[test]
fn test_state_manager_in_memory() {
    let manager = StateManager::in_memory();
    assert!(manager.is_in_memory());
}

#[test]
fn test_from_missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let manager = StateManager::from_file(dir.path().join("absent.json")).unwrap();
    assert!(!manager.is_in_memory());
}

#[test]
fn test_from_corrupt_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = StateManager::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse state file"));
}

// ============================================================================
// Record Tests
// ============================================================================

#[tokio::test]
async fn test_put_get_remove() {
    let manager = StateManager::in_memory();
    assert!(manager.get("db_url").await.is_none());

    manager
        .put("db_url", "gitlab_project_variable", sample_data())
        .await
        .unwrap();

    let record = manager.get("db_url").await.unwrap();
    assert_eq!(record.resource_type, "gitlab_project_variable");
    assert_eq!(record.data.id(), Some("group/app:DB_URL"));
    assert_eq!(manager.names().await, vec!["db_url".to_string()]);

    let removed = manager.remove("db_url").await.unwrap();
    assert!(removed.is_some());
    assert!(manager.get("db_url").await.is_none());
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_auto_save_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let manager = StateManager::from_file(&path).unwrap();
    manager
        .put("db_url", "gitlab_project_variable", sample_data())
        .await
        .unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());

    let reloaded = StateManager::from_file(&path).unwrap();
    let record = reloaded.get("db_url").await.unwrap();
    assert_eq!(record.data, sample_data());
}

#[tokio::test]
async fn test_in_memory_save_is_noop() {
    let manager = StateManager::in_memory();
    manager.save().await.unwrap();
    let json = manager.to_json_pretty().await.unwrap();
    assert!(json.contains("\"resources\""));
}
