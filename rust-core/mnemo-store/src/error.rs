// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Store error types for the MnemoDB graph engine.
//
// The engine has exactly one failure of its own (`NotFound` during
// add_observations); everything else bubbles up from the log codec.

use thiserror::Error;

/// Errors that can occur while executing a graph operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An `add_observations` item referenced an entity name that does not
    /// exist in the graph. Raised before any save, so the log on disk is
    /// unchanged when this error surfaces.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The persisted log could not be loaded or saved (I/O failure or a
    /// corrupt record).
    #[error(transparent)]
    Log(#[from] mnemo_log::LogError),
}

/// Convenience type alias for engine results.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// The missing entity name, when this is a `NotFound`.
    pub fn missing_entity(&self) -> Option<&str> {
        match self {
            Self::NotFound(name) => Some(name),
            _ => None,
        }
    }
}
