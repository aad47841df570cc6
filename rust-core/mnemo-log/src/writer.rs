// SPDX-License-Identifier: PMPL-1.0-or-later
//
// MnemoDB log codec - Snapshot writer
//
// Persists the full graph by rewriting the log wholesale: entities first,
// then relations, one record per line. The snapshot is written to a sibling
// temp file, fsynced, and renamed over the target, so a crash mid-save can
// truncate the temp file but never the log itself.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use mnemo_model::KnowledgeGraph;

use crate::error::LogResult;
use crate::record::graph_to_records;

/// Save the full graph to the log at `path`, replacing any previous
/// contents.
///
/// Parent directories are created if missing. Records are emitted in
/// current in-memory order, not sorted.
pub fn write_graph(path: impl AsRef<Path>, graph: &KnowledgeGraph) -> LogResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut contents = String::new();
    for record in graph_to_records(graph) {
        contents.push_str(&record.encode()?);
        contents.push('\n');
    }

    // Stage the snapshot next to the target so the rename stays on one
    // filesystem.
    let tmp_path = tmp_sibling(path);
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;

    debug!(
        path = %path.display(),
        entities = graph.entities.len(),
        relations = graph.relations.len(),
        bytes = contents.len(),
        "Persisted graph snapshot"
    );

    Ok(())
}

/// Build the staging path for a snapshot write: `<file>.tmp` in the same
/// directory.
fn tmp_sibling(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "memory.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
