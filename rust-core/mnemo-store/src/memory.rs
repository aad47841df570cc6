// SPDX-License-Identifier: PMPL-1.0-or-later
//
// In-memory backend for MnemoDB.
//
// Holds the graph snapshot in a tokio `RwLock`. All data lives in process
// memory and is lost on drop. Intended for testing, development, and small
// ephemeral datasets; semantics (load returns a private copy, save replaces
// the snapshot wholesale) mirror the file-log backend exactly.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mnemo_model::KnowledgeGraph;

use crate::backend::GraphBackend;
use crate::error::StoreResult;

/// An ephemeral graph backend backed by an in-process snapshot.
///
/// Thread-safe via `Arc<RwLock<...>>`; clones share the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    snapshot: Arc<RwLock<KnowledgeGraph>>,
}

impl InMemoryBackend {
    /// Create a new, empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with `graph`.
    pub fn with_graph(graph: KnowledgeGraph) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(graph)),
        }
    }

    /// Number of entities currently persisted.
    pub async fn entity_count(&self) -> usize {
        self.snapshot.read().await.entities.len()
    }

    /// Number of relations currently persisted.
    pub async fn relation_count(&self) -> usize {
        self.snapshot.read().await.relations.len()
    }
}

#[async_trait]
impl GraphBackend for InMemoryBackend {
    async fn load(&self) -> StoreResult<KnowledgeGraph> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, graph: &KnowledgeGraph) -> StoreResult<()> {
        *self.snapshot.write().await = graph.clone();
        Ok(())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
