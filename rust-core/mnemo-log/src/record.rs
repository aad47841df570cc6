// SPDX-License-Identifier: PMPL-1.0-or-later
//
// MnemoDB log codec - Record types
//
// One log line is one `LogRecord`: an internally tagged JSON object whose
// `"type"` field discriminates entity records from relation records. The
// remaining fields are exactly the wire schema of the model types, so the
// tag is the only thing this module adds on top of `mnemo-model`.

use mnemo_model::{Entity, KnowledgeGraph, Relation};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};

/// A single self-describing record in the persisted log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogRecord {
    /// An entity snapshot line.
    Entity(Entity),
    /// A relation snapshot line, with `from` spelled literally on the wire.
    Relation(Relation),
}

impl LogRecord {
    /// Encode this record as one log line (no trailing newline).
    pub fn encode(&self) -> LogResult<String> {
        serde_json::to_string(self).map_err(LogError::Encode)
    }

    /// Decode one log line into a record.
    ///
    /// `line_number` is 1-based and only used to label decode failures.
    pub fn decode(line: &str, line_number: usize) -> LogResult<Self> {
        serde_json::from_str(line).map_err(|source| LogError::Corrupt {
            line: line_number,
            source,
        })
    }
}

/// Flatten a graph into its log record sequence: every entity, then every
/// relation, each in current in-memory (insertion) order.
pub fn graph_to_records(graph: &KnowledgeGraph) -> Vec<LogRecord> {
    let mut records = Vec::with_capacity(graph.entities.len() + graph.relations.len());
    records.extend(graph.entities.iter().cloned().map(LogRecord::Entity));
    records.extend(graph.relations.iter().cloned().map(LogRecord::Relation));
    records
}
