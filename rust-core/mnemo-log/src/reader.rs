// SPDX-License-Identifier: PMPL-1.0-or-later
//
// MnemoDB log codec - Snapshot reader
//
// Materializes the current on-disk state into a `KnowledgeGraph`. A missing
// file is an empty graph, not an error; a malformed line fails the whole
// load. The reader never writes: a decode failure leaves the file untouched.

use std::fs;
use std::path::Path;

use tracing::debug;

use mnemo_model::KnowledgeGraph;

use crate::error::LogResult;
use crate::record::LogRecord;

/// Load the full graph from the log at `path`.
///
/// Returns an empty graph when the file does not exist. Whitespace-only
/// lines are skipped; every other line must decode into its declared record
/// kind or the load fails with [`crate::LogError::Corrupt`].
pub fn read_graph(path: impl AsRef<Path>) -> LogResult<KnowledgeGraph> {
    let path = path.as_ref();

    if !path.exists() {
        debug!(path = %path.display(), "Log file absent, starting from empty graph");
        return Ok(KnowledgeGraph::new());
    }

    let contents = fs::read_to_string(path)?;
    let mut graph = KnowledgeGraph::new();

    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match LogRecord::decode(line, index + 1)? {
            LogRecord::Entity(entity) => graph.entities.push(entity),
            LogRecord::Relation(relation) => graph.relations.push(relation),
        }
    }

    debug!(
        path = %path.display(),
        entities = graph.entities.len(),
        relations = graph.relations.len(),
        "Loaded graph from log"
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogError;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("memory.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_empty_graph() {
        let dir = TempDir::new().unwrap();
        let graph = read_graph(dir.path().join("nonexistent.json")).unwrap();
        assert!(graph.entities.is_empty());
        assert!(graph.relations.is_empty());
    }

    #[test]
    fn test_reads_entities_and_relations() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            concat!(
                r#"{"type":"entity","name":"Alice","entityType":"person","observations":["tea"]}"#,
                "\n",
                r#"{"type":"entity","name":"Bob","entityType":"person","observations":[]}"#,
                "\n",
                r#"{"type":"relation","from":"Alice","to":"Bob","relationType":"knows"}"#,
            ),
        );

        let graph = read_graph(&path).unwrap();
        assert_eq!(graph.entities.len(), 2);
        assert_eq!(graph.relations.len(), 1);
        assert_eq!(graph.entities[0].name, "Alice");
        assert_eq!(graph.entities[0].observations, vec!["tea"]);
        assert_eq!(graph.relations[0].from, "Alice");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            concat!(
                "\n",
                r#"{"type":"entity","name":"A","entityType":"t","observations":[]}"#,
                "\n",
                "   \n",
                "\n",
                r#"{"type":"entity","name":"B","entityType":"t","observations":[]}"#,
                "\n",
            ),
        );

        let graph = read_graph(&path).unwrap();
        assert_eq!(graph.entities.len(), 2);
    }

    #[test]
    fn test_corrupt_line_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            concat!(
                r#"{"type":"entity","name":"A","entityType":"t","observations":[]}"#,
                "\n",
                "this is not json\n",
                r#"{"type":"entity","name":"B","entityType":"t","observations":[]}"#,
            ),
        );

        match read_graph(&path).unwrap_err() {
            LogError::Corrupt { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_load_never_writes() {
        let dir = TempDir::new().unwrap();
        let contents = "not json at all\n";
        let path = write_log(&dir, contents);

        assert!(read_graph(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn test_empty_file_is_empty_graph() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "");
        let graph = read_graph(&path).unwrap();
        assert_eq!(graph, KnowledgeGraph::new());
    }
}
