// SPDX-License-Identifier: PMPL-1.0-or-later
//! MnemoDB Data Model
//!
//! Core types for the knowledge-graph memory store: named, typed entities
//! carrying free-text observations, directed typed relations between them,
//! and the `KnowledgeGraph` aggregate that the storage engine loads, mutates,
//! and persists as a unit.
//!
//! Wire field names (`entityType`, `relationType`, `from`, `entityName`,
//! `addedObservations`) are part of the persisted log format and the
//! operation surface, so the serde renames here are load-bearing.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod filter;

pub use filter::NodeFilter;

/// A named node in the graph.
///
/// `name` is the primary key: unique across the graph at all times.
/// `observations` is append-only; duplicates are rejected at add time but
/// the sequence is never re-deduplicated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier within the graph.
    pub name: String,

    /// Free-form category label.
    #[serde(rename = "entityType")]
    pub entity_type: String,

    /// Ordered free-text facts attached to this entity.
    #[serde(default)]
    pub observations: Vec<String>,

    /// Set once at creation; immutable afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Refreshed whenever the observation sequence changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Optional provenance: where this entity came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Optional provenance: who recorded this entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Optional labels, stored in order but matched as a set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Entity {
    /// Create a bare entity with the given name and type.
    ///
    /// Timestamps and provenance start unset; `created_at` is stamped by
    /// the store at insert time.
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            observations: Vec::new(),
            created_at: None,
            updated_at: None,
            source: None,
            user_id: None,
            tags: None,
        }
    }

    /// True if this entity carries at least one of the given tags.
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        match &self.tags {
            Some(tags) => tags.iter().any(|t| wanted.contains(t)),
            None => false,
        }
    }
}

/// A directed, typed edge between two entities, identified by endpoint names.
///
/// No existence check is enforced at creation time: an edge may reference a
/// not-yet-created or later-deleted entity, unless cascading delete removes
/// the edge itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Source entity name.
    pub from: String,

    /// Target entity name.
    pub to: String,

    /// Free-form edge label.
    #[serde(rename = "relationType")]
    pub relation_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Relation {
    /// Create a bare relation for the given triple.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation_type: relation_type.into(),
            created_at: None,
            updated_at: None,
            source: None,
            user_id: None,
            tags: None,
        }
    }

    /// The identity key of this relation.
    ///
    /// Two relations with the same `(from, to, relationType)` triple are
    /// duplicates regardless of their other fields.
    pub fn key(&self) -> RelationKey<'_> {
        RelationKey {
            from: &self.from,
            to: &self.to,
            relation_type: &self.relation_type,
        }
    }
}

/// Borrowed uniqueness key for a [`Relation`], used for deduplication on
/// insert and triple-matching on delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationKey<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub relation_type: &'a str,
}

/// The aggregate the store owns for the duration of one operation.
///
/// There is no persistent in-memory singleton: each operation reconstructs
/// the graph from the log, mutates a private copy, and persists it back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default)]
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl KnowledgeGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an entity by name.
    pub fn find_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Find an entity by name, mutably.
    pub fn find_entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name == name)
    }

    /// Project this graph onto a subset of entities.
    ///
    /// Keeps the given entities and only the relations whose `from` AND
    /// `to` are both among the selected names: the matched subgraph, not
    /// matched entities with all their edges.
    pub fn project(&self, selected: Vec<Entity>) -> KnowledgeGraph {
        let names: HashSet<&str> = selected.iter().map(|e| e.name.as_str()).collect();
        let relations = self
            .relations
            .iter()
            .filter(|r| names.contains(r.from.as_str()) && names.contains(r.to.as_str()))
            .cloned()
            .collect();
        KnowledgeGraph {
            entities: selected,
            relations,
        }
    }
}

// ---------------------------------------------------------------------------
// Operation request/result shapes
// ---------------------------------------------------------------------------

/// One item of an `add_observations` request: facts to append to a named
/// entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationAdd {
    #[serde(rename = "entityName")]
    pub entity_name: String,

    /// Candidate observation strings; ones already present are dropped.
    pub contents: Vec<String>,
}

/// Per-item result of `add_observations`: the observations actually
/// appended (empty if every candidate was already present).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationResult {
    #[serde(rename = "entityName")]
    pub entity_name: String,

    #[serde(rename = "addedObservations")]
    pub added: Vec<String>,
}

/// One item of a `delete_observations` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationDelete {
    #[serde(rename = "entityName")]
    pub entity_name: String,

    /// Observation strings to remove, matched exactly.
    pub observations: Vec<String>,
}
