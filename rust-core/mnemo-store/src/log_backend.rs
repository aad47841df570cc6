// SPDX-License-Identifier: PMPL-1.0-or-later
//
// File-log backend for MnemoDB.
//
// The default persistence strategy: the whole graph lives in one
// line-oriented JSON log, re-read before every operation and rewritten in
// full after it. Acceptable for small graphs; larger deployments substitute
// an indexed backend behind the same `GraphBackend` trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use mnemo_model::KnowledgeGraph;

use crate::backend::GraphBackend;
use crate::error::StoreResult;

/// A backend that persists the graph to a single log file via `mnemo-log`.
#[derive(Debug, Clone)]
pub struct LogBackend {
    /// Path to the log file. The file may not exist yet; the first save
    /// creates it (and any missing parent directories).
    path: PathBuf,
}

impl LogBackend {
    /// Create a backend over the log at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The log file path this backend reads and rewrites.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl GraphBackend for LogBackend {
    async fn load(&self) -> StoreResult<KnowledgeGraph> {
        Ok(mnemo_log::read_graph(&self.path)?)
    }

    async fn save(&self, graph: &KnowledgeGraph) -> StoreResult<()> {
        Ok(mnemo_log::write_graph(&self.path, graph)?)
    }

    fn name(&self) -> &str {
        "file-log"
    }
}
