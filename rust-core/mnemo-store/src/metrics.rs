// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Metrics-collecting wrapper for MnemoDB graph backends.
//
// Wraps any `GraphBackend` and transparently collects load/save counts,
// latency sums, and the record counts of the last persisted snapshot.
// Useful for spotting pathological whole-file rewrite costs as a graph
// grows.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mnemo_model::KnowledgeGraph;

use crate::backend::GraphBackend;
use crate::error::StoreResult;

/// Accumulated statistics for a graph backend.
///
/// All counters are monotonically increasing for the lifetime of the
/// [`MetricsBackend`] that owns them, except the `last_*` snapshot gauges.
#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    /// Number of `load` operations performed.
    pub load_count: u64,
    /// Number of `save` operations performed.
    pub save_count: u64,
    /// Cumulative wall-clock latency of all `load` calls, in milliseconds.
    pub load_latency_sum_ms: f64,
    /// Cumulative wall-clock latency of all `save` calls, in milliseconds.
    pub save_latency_sum_ms: f64,
    /// Entity count of the most recently saved snapshot.
    pub last_saved_entities: usize,
    /// Relation count of the most recently saved snapshot.
    pub last_saved_relations: usize,
}

/// A graph backend wrapper that collects operation metrics.
///
/// Delegates every operation to an inner backend while measuring wall-clock
/// latency and counting invocations. Statistics are available via
/// [`MetricsBackend::stats`].
pub struct MetricsBackend<B: GraphBackend> {
    /// The wrapped backend that performs the actual persistence.
    inner: B,
    /// Shared, mutable statistics accumulator.
    stats: Arc<RwLock<StoreStats>>,
}

impl<B: GraphBackend> MetricsBackend<B> {
    /// Wrap `inner` with metrics collection.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            stats: Arc::new(RwLock::new(StoreStats::default())),
        }
    }

    /// A snapshot of the accumulated statistics.
    pub async fn stats(&self) -> StoreStats {
        self.stats.read().await.clone()
    }

    /// Return a reference to the wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

#[async_trait]
impl<B: GraphBackend> GraphBackend for MetricsBackend<B> {
    async fn load(&self) -> StoreResult<KnowledgeGraph> {
        let start = Instant::now();
        let result = self.inner.load().await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut stats = self.stats.write().await;
        stats.load_count += 1;
        stats.load_latency_sum_ms += elapsed_ms;

        result
    }

    async fn save(&self, graph: &KnowledgeGraph) -> StoreResult<()> {
        let start = Instant::now();
        let result = self.inner.save(graph).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut stats = self.stats.write().await;
        stats.save_count += 1;
        stats.save_latency_sum_ms += elapsed_ms;
        if result.is_ok() {
            stats.last_saved_entities = graph.entities.len();
            stats.last_saved_relations = graph.relations.len();
        }

        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
