// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Core graph backend trait for MnemoDB.
//
// Defines the `GraphBackend` trait that all persistence implementations must
// satisfy. A backend materializes the current graph state and persists a
// replacement snapshot; the engine never asks for anything finer-grained, so
// a whole-file log, an in-memory snapshot, or an indexed key-value store can
// all sit behind the same seam.

use async_trait::async_trait;

use mnemo_model::KnowledgeGraph;

use crate::error::StoreResult;

/// A pluggable persistence backend for the knowledge graph.
///
/// Implementations must be safe to share across threads and tokio tasks.
/// Atomicity across concurrent callers is *not* a backend concern: the
/// engine serializes the full load-mutate-save sequence under its own lock.
#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// Materialize the current persisted state.
    ///
    /// A backend with no persisted state yet returns an empty graph, not an
    /// error. Must never modify the persisted state.
    async fn load(&self) -> StoreResult<KnowledgeGraph>;

    /// Persist `graph` in full, replacing the previous state.
    ///
    /// A failed save must leave the previous persisted state intact.
    async fn save(&self, graph: &KnowledgeGraph) -> StoreResult<()>;

    /// A human-readable name for this backend, used in logging and metrics.
    fn name(&self) -> &str;
}
