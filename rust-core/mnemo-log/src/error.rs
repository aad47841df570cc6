// SPDX-License-Identifier: PMPL-1.0-or-later
//
// MnemoDB log codec - Error types
//
// Defines all error conditions that can arise while loading or saving the
// persisted graph log: I/O failures and corrupt (undecodable) records.

use thiserror::Error;

/// Errors that can occur while reading or writing the graph log.
#[derive(Debug, Error)]
pub enum LogError {
    /// The underlying read or write of the log file could not complete
    /// (permissions, disk full, ...). Fatal to the operation; the writer's
    /// temp-file-then-rename discipline guarantees a failed save never
    /// leaves a partially written log behind.
    #[error("log I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted line failed to decode into its declared record kind.
    /// Parse failures are surfaced, never skipped: one corrupt line fails
    /// the whole load.
    #[error("corrupt log record at line {line}: {source}")]
    Corrupt {
        /// 1-based line number of the offending record.
        line: usize,
        /// The underlying JSON decode failure.
        source: serde_json::Error,
    },

    /// A record could not be serialized for writing. Should not happen for
    /// well-formed graphs; surfaced rather than panicking.
    #[error("failed to encode log record: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Convenience type alias for log codec results.
pub type LogResult<T> = Result<T, LogError>;
