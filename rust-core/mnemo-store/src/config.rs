// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Log path configuration for MnemoDB.
//
// The log file path is supplied externally through the MEMORY_FILE_PATH
// environment variable. Relative paths are resolved against a fixed base
// directory chosen by the embedding process; absolute paths are used as-is.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable naming the log file.
pub const MEMORY_FILE_PATH_ENV: &str = "MEMORY_FILE_PATH";

/// Default log file name when the environment variable is unset.
pub const DEFAULT_MEMORY_FILE: &str = "memory.json";

/// Resolved storage configuration for one graph store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Absolute (or base-resolved) path to the log file.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Build a configuration from an explicit path, resolving relative
    /// paths against `base_dir`.
    pub fn resolve(path: impl AsRef<Path>, base_dir: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.as_ref().join(path)
        };
        Self { path: resolved }
    }

    /// Build a configuration from `MEMORY_FILE_PATH`, falling back to
    /// `memory.json`, resolved against `base_dir`.
    pub fn from_env(base_dir: impl AsRef<Path>) -> Self {
        let raw = std::env::var(MEMORY_FILE_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_MEMORY_FILE.to_string());
        let config = Self::resolve(&raw, base_dir);
        debug!(path = %config.path.display(), "Resolved memory log path");
        config
    }
}
