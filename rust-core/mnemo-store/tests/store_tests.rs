// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for the MnemoDB engine over a real log file
//!
//! Exercises the full load -> mutate -> save cycle through `LogBackend`,
//! including the on-disk guarantees that in-memory unit tests cannot see.

use std::fs;

use tempfile::TempDir;

use mnemo_model::{Entity, KnowledgeGraph, NodeFilter, ObservationAdd, Relation};
use mnemo_store::{GraphStore, LogBackend, MetricsBackend, StoreConfig};

fn log_store(dir: &TempDir) -> (GraphStore<LogBackend>, std::path::PathBuf) {
    let path = dir.path().join("memory.json");
    (GraphStore::new(LogBackend::new(&path)), path)
}

#[tokio::test]
async fn test_state_survives_store_drop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");

    {
        let store = GraphStore::new(LogBackend::new(&path));
        store
            .create_entities(vec![Entity::new("Alice", "person")])
            .await
            .unwrap();
        store
            .create_relations(vec![Relation::new("Alice", "Alice", "self")])
            .await
            .unwrap();
    }

    // A fresh store over the same path sees everything: the log is the
    // sole source of truth between operations.
    let store = GraphStore::new(LogBackend::new(&path));
    let graph = store.read_graph().await.unwrap();
    assert_eq!(graph.entities.len(), 1);
    assert_eq!(graph.relations.len(), 1);
}

#[tokio::test]
async fn test_not_found_leaves_log_untouched() {
    let dir = TempDir::new().unwrap();
    let (store, path) = log_store(&dir);

    store
        .create_entities(vec![Entity::new("Alice", "person")])
        .await
        .unwrap();
    let before = fs::read(&path).unwrap();

    let error = store
        .add_observations(vec![
            ObservationAdd {
                entity_name: "Alice".to_string(),
                contents: vec!["should not persist".to_string()],
            },
            ObservationAdd {
                entity_name: "Ghost".to_string(),
                contents: vec!["boo".to_string()],
            },
        ])
        .await
        .unwrap_err();

    assert_eq!(error.missing_entity(), Some("Ghost"));
    assert_eq!(
        fs::read(&path).unwrap(),
        before,
        "log must be byte-identical after a rejected batch"
    );
}

#[tokio::test]
async fn test_cascading_delete_on_disk() {
    let dir = TempDir::new().unwrap();
    let (store, path) = log_store(&dir);

    store
        .create_entities(vec![Entity::new("A", "t"), Entity::new("B", "t")])
        .await
        .unwrap();
    store
        .create_relations(vec![Relation::new("A", "B", "linked")])
        .await
        .unwrap();

    store.delete_entities(vec!["A".to_string()]).await.unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("\"A\""));
    assert!(!contents.contains("relation"));

    let graph = store.read_graph().await.unwrap();
    assert_eq!(graph.entities.len(), 1);
    assert!(graph.relations.is_empty());
}

#[tokio::test]
async fn test_search_projection_end_to_end() {
    let dir = TempDir::new().unwrap();
    let (store, _path) = log_store(&dir);

    let mut x = Entity::new("X", "widget");
    x.observations = vec!["rare find".to_string()];
    store
        .create_entities(vec![x, Entity::new("Y", "widget")])
        .await
        .unwrap();
    store
        .create_relations(vec![Relation::new("X", "Y", "near")])
        .await
        .unwrap();

    let result = store.search_nodes(NodeFilter::query("rare")).await.unwrap();
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities[0].name, "X");
    assert!(result.relations.is_empty());
}

#[tokio::test]
async fn test_corrupt_log_fails_every_operation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    fs::write(&path, "{\"type\":\"entity\"  broken\n").unwrap();

    let store = GraphStore::new(LogBackend::new(&path));
    assert!(store.read_graph().await.is_err());
    assert!(store
        .create_entities(vec![Entity::new("A", "t")])
        .await
        .is_err());

    // The corrupt file is still exactly as it was: load never writes.
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\"type\":\"entity\"  broken\n"
    );
}

#[tokio::test]
async fn test_reads_legacy_log_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    // Older logs: no trailing newline, explicit nulls for unset fields,
    // relation records carrying only the triple.
    fs::write(
        &path,
        concat!(
            r#"{"type": "entity", "name": "Alice", "entityType": "person", "observations": ["tea"], "created_at": null, "updated_at": null, "source": null, "user_id": null, "tags": null}"#,
            "\n",
            r#"{"type": "relation", "from": "Alice", "to": "Alice", "relationType": "self"}"#,
        ),
    )
    .unwrap();

    let store = GraphStore::new(LogBackend::new(&path));
    let graph = store.read_graph().await.unwrap();
    assert_eq!(graph.entities.len(), 1);
    assert_eq!(graph.relations.len(), 1);
    assert_eq!(graph.entities[0].observations, vec!["tea"]);
}

#[tokio::test]
async fn test_metrics_wrapper_over_log_backend() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    let store = GraphStore::new(MetricsBackend::new(LogBackend::new(&path)));

    store
        .create_entities(vec![Entity::new("A", "t"), Entity::new("B", "t")])
        .await
        .unwrap();
    store.read_graph().await.unwrap();

    let stats = store.backend().stats().await;
    assert_eq!(stats.load_count, 2); // one per operation
    assert_eq!(stats.save_count, 1);
    assert_eq!(stats.last_saved_entities, 2);
}

#[tokio::test]
async fn test_open_from_resolved_config() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::resolve("state/memory.json", dir.path());
    assert!(config.path.is_absolute() || config.path.starts_with(dir.path()));

    let store = GraphStore::open(&config);
    store
        .create_entities(vec![Entity::new("Configured", "t")])
        .await
        .unwrap();

    assert!(dir.path().join("state").join("memory.json").exists());
}

#[tokio::test]
async fn test_save_load_save_stability_through_engine() {
    let dir = TempDir::new().unwrap();
    let (store, path) = log_store(&dir);

    let mut alice = Entity::new("Alice", "person");
    alice.tags = Some(vec!["vip".to_string()]);
    store
        .create_entities(vec![alice, Entity::new("Bob", "person")])
        .await
        .unwrap();
    store
        .create_relations(vec![Relation::new("Alice", "Bob", "knows")])
        .await
        .unwrap();

    let first = fs::read(&path).unwrap();

    // Reload and rewrite through the codec; bytes must be stable.
    let graph: KnowledgeGraph = mnemo_log::read_graph(&path).unwrap();
    let second_path = dir.path().join("second.json");
    mnemo_log::write_graph(&second_path, &graph).unwrap();

    assert_eq!(first, fs::read(&second_path).unwrap());
}
