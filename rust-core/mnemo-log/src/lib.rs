// SPDX-License-Identifier: PMPL-1.0-or-later
//
// MnemoDB log codec crate
//
// Serializes knowledge-graph snapshots to a flat, line-oriented log and
// materializes them back. Each line is one self-describing JSON record,
// tagged `"type": "entity"` or `"type": "relation"`; the whole graph is
// rewritten on every save (there is no incremental append).
//
// # On-disk format
//
// ```text
// {"type":"entity","name":"Alice","entityType":"person","observations":[...]}
// {"type":"relation","from":"Alice","to":"Bob","relationType":"knows"}
// ```
//
// UTF-8 text, entities first then relations, each in insertion order.
// Blank lines are skipped on read; any malformed line fails the whole load
// with a [`LogError::Corrupt`] naming its line number.
//
// ## Usage
//
// ```no_run
// use mnemo_log::{read_graph, write_graph};
// use mnemo_model::{Entity, KnowledgeGraph};
//
// let mut graph = read_graph("/var/lib/mnemo/memory.json").unwrap();
// graph.entities.push(Entity::new("Alice", "person"));
// write_graph("/var/lib/mnemo/memory.json", &graph).unwrap();
// ```

pub mod error;
pub mod reader;
pub mod record;
pub mod writer;

// Re-export the primary public API for ergonomic imports.
pub use error::{LogError, LogResult};
pub use reader::read_graph;
pub use record::LogRecord;
pub use writer::write_graph;
