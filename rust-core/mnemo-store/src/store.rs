// SPDX-License-Identifier: PMPL-1.0-or-later
//
// The MnemoDB graph engine.
//
// Every operation is one critical section: load the persisted graph, apply
// the operation to the private copy, persist the result in full. The store
// keeps no graph state of its own between calls; the backend is the sole
// source of truth. A per-store mutex serializes the load-mutate-save
// sequence so two operations against the same backend can never race into a
// lost update.

use std::collections::HashSet;

use chrono::Utc;
use tracing::debug;

use mnemo_model::{
    Entity, KnowledgeGraph, NodeFilter, ObservationAdd, ObservationDelete, ObservationResult,
    Relation,
};

use crate::backend::GraphBackend;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::log_backend::LogBackend;

/// The knowledge-graph storage and query engine.
///
/// Generic over its persistence backend; see [`crate::LogBackend`] for the
/// default whole-file log strategy and [`crate::InMemoryBackend`] for an
/// ephemeral one.
pub struct GraphStore<B: GraphBackend> {
    backend: B,
    /// Serializes load-mutate-save across concurrent callers of this store.
    lock: tokio::sync::Mutex<()>,
}

impl GraphStore<LogBackend> {
    /// Open a file-log-backed store from a resolved configuration.
    pub fn open(config: &StoreConfig) -> Self {
        Self::new(LogBackend::new(&config.path))
    }
}

impl<B: GraphBackend> GraphStore<B> {
    /// Create a store over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Return a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert entities whose names are not already taken.
    ///
    /// Duplicates — against the stored graph or earlier in the same batch —
    /// are silently dropped. `created_at` is stamped on each accepted entity
    /// unless the caller supplied one. Returns exactly the inserted subset.
    pub async fn create_entities(&self, new: Vec<Entity>) -> StoreResult<Vec<Entity>> {
        let _guard = self.lock.lock().await;
        let mut graph = self.backend.load().await?;

        let mut taken: HashSet<String> =
            graph.entities.iter().map(|e| e.name.clone()).collect();
        let now = Utc::now();

        let mut created = Vec::new();
        for mut entity in new {
            if !taken.insert(entity.name.clone()) {
                continue;
            }
            if entity.created_at.is_none() {
                entity.created_at = Some(now);
            }
            created.push(entity);
        }

        graph.entities.extend(created.iter().cloned());
        self.backend.save(&graph).await?;

        debug!(
            backend = self.backend.name(),
            created = created.len(),
            "create_entities"
        );
        Ok(created)
    }

    /// Insert relations whose `(from, to, relationType)` triple is not
    /// already present.
    ///
    /// Same silent-drop contract as [`Self::create_entities`], keyed on the
    /// triple. Endpoints are not checked for existence.
    pub async fn create_relations(&self, new: Vec<Relation>) -> StoreResult<Vec<Relation>> {
        let _guard = self.lock.lock().await;
        let mut graph = self.backend.load().await?;

        let mut taken: HashSet<(String, String, String)> = graph
            .relations
            .iter()
            .map(|r| (r.from.clone(), r.to.clone(), r.relation_type.clone()))
            .collect();

        let mut created = Vec::new();
        for relation in new {
            let key = (
                relation.from.clone(),
                relation.to.clone(),
                relation.relation_type.clone(),
            );
            if !taken.insert(key) {
                continue;
            }
            created.push(relation);
        }

        graph.relations.extend(created.iter().cloned());
        self.backend.save(&graph).await?;

        debug!(
            backend = self.backend.name(),
            created = created.len(),
            "create_relations"
        );
        Ok(created)
    }

    /// Append observations to named entities.
    ///
    /// Fails with [`StoreError::NotFound`] if any referenced entity is
    /// absent. Every name is validated against the loaded graph before
    /// anything is mutated, so a failed batch persists nothing — including
    /// items ordered before the missing one. Per item, `added` contains
    /// only the contents not already present (exact string match);
    /// `updated_at` is refreshed when anything was appended.
    pub async fn add_observations(
        &self,
        items: Vec<ObservationAdd>,
    ) -> StoreResult<Vec<ObservationResult>> {
        let _guard = self.lock.lock().await;
        let mut graph = self.backend.load().await?;

        // Reject before mutating: the rejection must happen before
        // persistence, not be left to return-value discarding.
        for item in &items {
            if graph.find_entity(&item.entity_name).is_none() {
                return Err(StoreError::NotFound(item.entity_name.clone()));
            }
        }

        let now = Utc::now();
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            let entity = graph
                .find_entity_mut(&item.entity_name)
                .ok_or_else(|| StoreError::NotFound(item.entity_name.clone()))?;

            let added: Vec<String> = item
                .contents
                .into_iter()
                .filter(|c| !entity.observations.contains(c))
                .collect();
            if !added.is_empty() {
                entity.observations.extend(added.iter().cloned());
                entity.updated_at = Some(now);
            }

            results.push(ObservationResult {
                entity_name: item.entity_name,
                added,
            });
        }

        self.backend.save(&graph).await?;

        debug!(
            backend = self.backend.name(),
            items = results.len(),
            "add_observations"
        );
        Ok(results)
    }

    /// Remove entities by name, cascading to every relation that touches
    /// them.
    ///
    /// Names not present are ignored; always succeeds.
    pub async fn delete_entities(&self, names: Vec<String>) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut graph = self.backend.load().await?;

        let doomed: HashSet<&str> = names.iter().map(String::as_str).collect();
        let before_entities = graph.entities.len();
        let before_relations = graph.relations.len();

        graph.entities.retain(|e| !doomed.contains(e.name.as_str()));
        graph.relations.retain(|r| {
            !doomed.contains(r.from.as_str()) && !doomed.contains(r.to.as_str())
        });

        debug!(
            backend = self.backend.name(),
            entities_removed = before_entities - graph.entities.len(),
            relations_removed = before_relations - graph.relations.len(),
            "delete_entities"
        );

        self.backend.save(&graph).await?;
        Ok(())
    }

    /// Remove listed observation strings from named entities.
    ///
    /// Entities not found are silently skipped — unlike
    /// [`Self::add_observations`], this path never errors. `updated_at` is
    /// refreshed only on entities that actually lost an observation,
    /// matching the add path's rule that only a real change to the
    /// sequence counts as an update.
    pub async fn delete_observations(
        &self,
        deletions: Vec<ObservationDelete>,
    ) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut graph = self.backend.load().await?;

        let now = Utc::now();
        for deletion in &deletions {
            if let Some(entity) = graph.find_entity_mut(&deletion.entity_name) {
                let before = entity.observations.len();
                entity
                    .observations
                    .retain(|o| !deletion.observations.contains(o));
                if entity.observations.len() < before {
                    entity.updated_at = Some(now);
                }
            }
        }

        self.backend.save(&graph).await?;

        debug!(
            backend = self.backend.name(),
            items = deletions.len(),
            "delete_observations"
        );
        Ok(())
    }

    /// Remove every relation whose triple matches any of `targets`.
    ///
    /// Non-matching targets are ignored; other fields on the targets play
    /// no part in matching.
    pub async fn delete_relations(&self, targets: Vec<Relation>) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut graph = self.backend.load().await?;

        let doomed: HashSet<_> = targets.iter().map(Relation::key).collect();
        let before = graph.relations.len();

        graph.relations.retain(|r| !doomed.contains(&r.key()));

        debug!(
            backend = self.backend.name(),
            removed = before - graph.relations.len(),
            "delete_relations"
        );

        self.backend.save(&graph).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Return the full current graph, unfiltered.
    pub async fn read_graph(&self) -> StoreResult<KnowledgeGraph> {
        let _guard = self.lock.lock().await;
        self.backend.load().await
    }

    /// Return the subgraph of entities matching `filter`.
    ///
    /// Entities are selected first; the returned relations are restricted
    /// to edges whose endpoints are both among the selected names.
    pub async fn search_nodes(&self, filter: NodeFilter) -> StoreResult<KnowledgeGraph> {
        let _guard = self.lock.lock().await;
        let graph = self.backend.load().await?;

        let selected: Vec<Entity> = graph
            .entities
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        debug!(
            backend = self.backend.name(),
            matched = selected.len(),
            "search_nodes"
        );
        Ok(graph.project(selected))
    }

    /// Return the subgraph of the named entities, projected the same way
    /// as [`Self::search_nodes`].
    pub async fn open_nodes(&self, names: Vec<String>) -> StoreResult<KnowledgeGraph> {
        let _guard = self.lock.lock().await;
        let graph = self.backend.load().await?;

        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        let selected: Vec<Entity> = graph
            .entities
            .iter()
            .filter(|e| wanted.contains(e.name.as_str()))
            .cloned()
            .collect();

        Ok(graph.project(selected))
    }
}
